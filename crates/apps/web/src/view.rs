//! Per-view state behind the exported `GlobeView`.

use formats::{RegionCollection, RegionSourceError};
use foundation::RegionId;
use scene::{
    CameraController, SelectionNotifier, SelectionState, SelectionToggle, Transition,
};
use tracing::{debug, info, warn};

use crate::config::GlobeConfig;

/// Pointer travel in CSS pixels past which a press counts as a drag.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// One press inside the root element, from `pointerdown` to its `click`.
#[derive(Debug, Clone, Copy)]
struct Gesture {
    start: (f64, f64),
    /// The globe already reported this press as a region or surface click.
    handled: bool,
}

impl Gesture {
    fn dragged_to(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.start.0, y - self.start.1);
        dx.hypot(dy) > DRAG_THRESHOLD_PX
    }
}

pub struct ViewState {
    pub config: GlobeConfig,
    toggle: SelectionToggle,
    selection: SelectionState,
    regions: RegionCollection,
    camera: Box<dyn CameraController>,
    notifier: Box<dyn SelectionNotifier>,
    gesture: Option<Gesture>,
}

impl ViewState {
    pub fn new(
        config: GlobeConfig,
        camera: Box<dyn CameraController>,
        notifier: Box<dyn SelectionNotifier>,
    ) -> Self {
        let toggle = SelectionToggle::new(config.focus.clone());
        Self {
            config,
            toggle,
            selection: SelectionState::new(),
            regions: RegionCollection::default(),
            camera,
            notifier,
            gesture: None,
        }
    }

    /// Initial point of view with rotation on.
    pub fn show_overview(&mut self) {
        let initial = self.toggle.config().initial_view();
        self.camera.fly_to(initial, None);
        self.camera.set_auto_rotate(true);
    }

    pub fn load_regions(&mut self, geojson: &str) -> Result<usize, RegionSourceError> {
        let regions = RegionCollection::from_geojson_str(geojson)?;
        let count = regions.len();
        self.regions = regions;
        // A focused region that no longer exists can't be toggled off by name.
        if let Some(id) = self.selection.focused()
            && self.regions.get(id).is_none()
        {
            info!(region = %id, "focused region not in new boundaries; resetting");
            self.toggle.on_background_click(
                &mut self.selection,
                self.camera.as_mut(),
                self.notifier.as_mut(),
            );
        }
        Ok(count)
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn focused(&self) -> Option<&RegionId> {
        self.selection.focused()
    }

    /// Starts a gesture; the root click that ends it is judged against it.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.gesture = Some(Gesture {
            start: (x, y),
            handled: false,
        });
    }

    pub fn region_clicked(&mut self, name: &str) -> Transition {
        self.mark_handled();
        let Some(region) = self.regions.get_by_name(name) else {
            warn!(region = name, "click on unknown region");
            return Transition::Unchanged;
        };
        self.toggle
            .on_region_click(
                &mut self.selection,
                region,
                self.camera.as_mut(),
                self.notifier.as_mut(),
            )
            .unwrap_or(Transition::Unchanged)
    }

    pub fn background_clicked(&mut self) -> Transition {
        self.mark_handled();
        self.toggle.on_background_click(
            &mut self.selection,
            self.camera.as_mut(),
            self.notifier.as_mut(),
        )
    }

    /// Any click inside the view's root element, at client coordinates.
    ///
    /// Ends the current gesture. A press the globe already reported, or one
    /// that dragged the globe, is not a background click. A click with no
    /// gesture behind it (synthetic or keyboard) is.
    pub fn root_clicked(&mut self, x: f64, y: f64) -> Transition {
        match self.gesture.take() {
            Some(g) if g.handled => Transition::Unchanged,
            Some(g) if g.dragged_to(x, y) => {
                debug!("drag released; keeping focus");
                Transition::Unchanged
            }
            _ => self.background_clicked(),
        }
    }

    fn mark_handled(&mut self) {
        if let Some(g) = self.gesture.as_mut() {
            g.handled = true;
        }
    }
}
