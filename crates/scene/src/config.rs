use std::time::Duration;

use serde::Deserialize;

use crate::camera::CameraTarget;

/// What to tell the host when the focused region is clicked again.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeselectPolicy {
    /// Leave the host filter as it is.
    #[default]
    Silent,
    /// Ask the host to clear its filter.
    ClearFilter,
}

/// Camera and notification tuning for focus transitions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    pub initial_lat_deg: f64,
    pub initial_lon_deg: f64,
    pub initial_altitude: f64,
    /// Altitude (globe radii) when a region is focused.
    pub focus_altitude: f64,
    /// Altitude (globe radii) after a reset.
    pub overview_altitude: f64,
    pub focus_duration_ms: u64,
    pub reset_duration_ms: u64,
    pub auto_rotate_speed: f64,
    pub deselect_policy: DeselectPolicy,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            initial_lat_deg: 30.0,
            initial_lon_deg: -90.0,
            initial_altitude: 2.0,
            focus_altitude: 0.7,
            overview_altitude: 3.0,
            focus_duration_ms: 2000,
            reset_duration_ms: 1000,
            auto_rotate_speed: 1.2,
            deselect_policy: DeselectPolicy::Silent,
        }
    }
}

impl FocusConfig {
    pub fn initial_view(&self) -> CameraTarget {
        CameraTarget::new(
            self.initial_lat_deg,
            self.initial_lon_deg,
            self.initial_altitude,
        )
    }

    pub fn focus_duration(&self) -> Option<Duration> {
        non_zero_ms(self.focus_duration_ms)
    }

    pub fn reset_duration(&self) -> Option<Duration> {
        non_zero_ms(self.reset_duration_ms)
    }
}

fn non_zero_ms(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}
