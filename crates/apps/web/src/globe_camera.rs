//! Camera commands forwarded to the JS globe instance.

use std::time::Duration;

use scene::{CameraController, CameraTarget};
use tracing::warn;
use wasm_bindgen::JsValue;

use crate::bridge::{
    get_f64, globe_fly_to, globe_point_of_view, globe_set_auto_rotate, js_error_text,
};

#[derive(Debug)]
pub struct GlobeCamera {
    globe: JsValue,
    auto_rotate_speed: f64,
    /// Last target requested; answers `point_of_view` if the globe can't.
    last_target: CameraTarget,
}

impl GlobeCamera {
    pub fn new(globe: JsValue, initial: CameraTarget, auto_rotate_speed: f64) -> Self {
        Self {
            globe,
            auto_rotate_speed,
            last_target: initial,
        }
    }
}

impl CameraController for GlobeCamera {
    fn point_of_view(&self) -> CameraTarget {
        let pov = match globe_point_of_view(&self.globe) {
            Ok(pov) => pov,
            Err(err) => {
                warn!(error = %js_error_text(&err), "globe point of view unavailable");
                return self.last_target;
            }
        };
        match (
            get_f64(&pov, "lat"),
            get_f64(&pov, "lng"),
            get_f64(&pov, "altitude"),
        ) {
            (Some(lat), Some(lng), Some(altitude)) => CameraTarget::new(lat, lng, altitude),
            _ => self.last_target,
        }
    }

    fn fly_to(&mut self, target: CameraTarget, transition: Option<Duration>) {
        let ms = transition.map_or(0.0, |d| d.as_secs_f64() * 1000.0);
        if let Err(err) = globe_fly_to(
            &self.globe,
            target.lat_deg,
            target.lon_deg,
            target.altitude,
            ms,
        ) {
            warn!(error = %js_error_text(&err), "globe camera move failed");
        }
        self.last_target = target;
    }

    fn set_auto_rotate(&mut self, enabled: bool) {
        if let Err(err) = globe_set_auto_rotate(&self.globe, enabled, self.auto_rotate_speed) {
            warn!(error = %js_error_text(&err), "globe auto-rotate toggle failed");
        }
    }
}
