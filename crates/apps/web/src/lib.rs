use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use scene::{DetachedNotifier, NotifierError, SelectionNotifier, Transition};
use tracing::{Level, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{Element, MouseEvent};

mod bridge;
mod config;
mod globe_camera;
mod host;
mod listeners;
mod logging;
mod view;

pub use config::{ConfigError, GlobeConfig};

use globe_camera::GlobeCamera;
use host::HostNotifier;
use listeners::MouseListener;
use view::ViewState;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init(Level::INFO);
    Ok(())
}

/// One mounted globe view.
///
/// Owns the selection state for its globe and the pointer listeners on its
/// root element; `unmount` (or dropping the view from JS via `free`) removes
/// them.
#[wasm_bindgen]
pub struct GlobeView {
    state: Rc<RefCell<ViewState>>,
    root_listeners: Vec<MouseListener>,
}

#[wasm_bindgen]
impl GlobeView {
    /// `globe` is the JS globe instance; `config_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(root: Element, globe: JsValue, config_json: &str) -> Result<GlobeView, JsValue> {
        let config =
            GlobeConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let camera = GlobeCamera::new(
            globe,
            config.focus.initial_view(),
            config.focus.auto_rotate_speed,
        );
        let notifier = connect_host(&config);

        let mut view = ViewState::new(config, Box::new(camera), notifier);
        view.show_overview();
        let state = Rc::new(RefCell::new(view));

        let pointer_down = on_root(&root, &state, "pointerdown", |view, event| {
            view.pointer_down(f64::from(event.client_x()), f64::from(event.client_y()));
        })?;
        let click = on_root(&root, &state, "click", |view, event| {
            view.root_clicked(f64::from(event.client_x()), f64::from(event.client_y()));
        })?;

        Ok(GlobeView {
            state,
            root_listeners: vec![pointer_down, click],
        })
    }

    /// Replaces the region boundaries with a parsed GeoJSON FeatureCollection.
    pub fn load_regions(&self, geojson: &str) -> Result<usize, JsValue> {
        self.state
            .borrow_mut()
            .load_regions(geojson)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Fetches the configured regions URL; resolves to the region count.
    pub fn fetch_regions(&self) -> js_sys::Promise {
        let state = Rc::clone(&self.state);
        let url = state.borrow().config.regions_url.clone();
        future_to_promise(async move {
            let text = fetch_text(&url).await.inspect_err(|err| {
                warn!(url = %url, error = ?err, "failed to fetch region boundaries");
            })?;
            let count = state
                .borrow_mut()
                .load_regions(&text)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(JsValue::from_f64(count as f64))
        })
    }

    /// Forwarded from the globe's polygon click callback.
    pub fn region_clicked(&self, name: &str) -> Result<JsValue, JsValue> {
        let t = self.state.borrow_mut().region_clicked(name);
        transition_to_js(&t)
    }

    /// Forwarded from the globe's surface click callback (no polygon hit).
    pub fn background_clicked(&self) -> Result<JsValue, JsValue> {
        let t = self.state.borrow_mut().background_clicked();
        transition_to_js(&t)
    }

    pub fn focused_region(&self) -> Option<String> {
        self.state.borrow().focused().map(|id| id.to_string())
    }

    pub fn region_count(&self) -> usize {
        self.state.borrow().region_count()
    }

    pub fn size_field(&self) -> Option<String> {
        self.state.borrow().config.size_field.clone()
    }

    /// Releases the root element listeners. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.root_listeners.is_empty() {
            self.root_listeners.clear();
            info!("globe view unmounted");
        }
    }
}

/// Point radii for the configured size field; `NaN` marks a missing value.
#[wasm_bindgen]
pub fn point_radii(values: Vec<f64>) -> Vec<f64> {
    let values: Vec<Option<f64>> = values
        .into_iter()
        .map(|v| (!v.is_nan()).then_some(v))
        .collect();
    scene::points::point_radii(&values)
}

/// Forwards `event` on the root element to the view, if it is still alive.
fn on_root(
    root: &Element,
    state: &Rc<RefCell<ViewState>>,
    event: &'static str,
    mut handler: impl FnMut(&mut ViewState, &MouseEvent) + 'static,
) -> Result<MouseListener, JsValue> {
    let weak = Rc::downgrade(state);
    MouseListener::attach(root, event, move |e| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        // Skip if a handler further up the stack still holds the view.
        let Ok(mut view) = state.try_borrow_mut() else {
            return;
        };
        handler(&mut view, &e);
    })
}

fn connect_host(config: &GlobeConfig) -> Box<dyn SelectionNotifier> {
    match HostNotifier::connect(config.worksheet_name.as_deref(), &config.filter_field) {
        Ok(n) => Box::new(n),
        Err(NotifierError::CapabilityUnavailable) => {
            info!("no host dashboard; selections stay local");
            Box::new(DetachedNotifier)
        }
        Err(err) => {
            warn!(error = %err, "host dashboard unusable; selections stay local");
            Box::new(DetachedNotifier)
        }
    }
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "GET {url} failed with status {}",
            resp.status()
        )));
    }
    resp.text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn transition_to_js(t: &Transition) -> Result<JsValue, JsValue> {
    let out = js_sys::Object::new();
    let (kind, region) = match t {
        Transition::Focused { region, .. } => ("focused", Some(region)),
        Transition::Reset { region, .. } => ("reset", Some(region)),
        Transition::Unchanged => ("unchanged", None),
    };
    js_sys::Reflect::set(&out, &JsValue::from_str("kind"), &JsValue::from_str(kind))?;
    let region = region.map_or(JsValue::NULL, |r| JsValue::from_str(r.as_str()));
    js_sys::Reflect::set(&out, &JsValue::from_str("region"), &region)?;
    if let Transition::Focused { target, .. } = t {
        js_sys::Reflect::set(&out, &JsValue::from_str("lat"), &JsValue::from_f64(target.lat_deg))?;
        js_sys::Reflect::set(&out, &JsValue::from_str("lng"), &JsValue::from_f64(target.lon_deg))?;
    }
    Ok(out.into())
}
