use std::time::Duration;

use foundation::FocusPoint;

/// Globe point of view.
///
/// `altitude` is measured in globe radii above the surface, the unit the
/// JS globe library uses for its camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraTarget {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub altitude: f64,
}

impl CameraTarget {
    pub fn new(lat_deg: f64, lon_deg: f64, altitude: f64) -> Self {
        Self {
            lat_deg,
            lon_deg,
            altitude,
        }
    }

    pub fn over(focus: FocusPoint, altitude: f64) -> Self {
        Self::new(focus.lat_deg, focus.lon_deg, altitude)
    }

    /// Same ground position, different altitude.
    pub fn with_altitude(self, altitude: f64) -> Self {
        Self { altitude, ..self }
    }
}

/// Camera capability supplied by whatever renders the globe.
pub trait CameraController {
    /// Current point of view.
    fn point_of_view(&self) -> CameraTarget;

    /// Moves the camera, animating over `transition` when given.
    fn fly_to(&mut self, target: CameraTarget, transition: Option<Duration>);

    fn set_auto_rotate(&mut self, enabled: bool);
}
