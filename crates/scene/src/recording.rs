//! Camera and notifier stand-ins that record what they were asked to do.
//!
//! Used for replaying click sequences off-browser and in tests.

use std::time::Duration;

use foundation::RegionId;

use crate::camera::{CameraController, CameraTarget};
use crate::notifier::{NotifierError, SelectionNotifier};

#[derive(Debug, Clone, PartialEq)]
pub enum CameraCall {
    FlyTo(CameraTarget, Option<Duration>),
    AutoRotate(bool),
}

/// Camera that jumps straight to every target and logs each request.
#[derive(Debug, Clone)]
pub struct RecordingCamera {
    pub view: CameraTarget,
    pub auto_rotate: bool,
    pub calls: Vec<CameraCall>,
}

impl RecordingCamera {
    pub fn new(view: CameraTarget) -> Self {
        Self {
            view,
            auto_rotate: true,
            calls: Vec::new(),
        }
    }
}

impl CameraController for RecordingCamera {
    fn point_of_view(&self) -> CameraTarget {
        self.view
    }

    fn fly_to(&mut self, target: CameraTarget, transition: Option<Duration>) {
        self.view = target;
        self.calls.push(CameraCall::FlyTo(target, transition));
    }

    fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
        self.calls.push(CameraCall::AutoRotate(enabled));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Apply(RegionId),
    Clear,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub calls: Vec<NotifierCall>,
    fail_with: Option<NotifierError>,
}

impl RecordingNotifier {
    /// Records calls but answers every one of them with `err`.
    pub fn failing(err: NotifierError) -> Self {
        Self {
            calls: Vec::new(),
            fail_with: Some(err),
        }
    }

    fn answer(&self) -> Result<(), NotifierError> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl SelectionNotifier for RecordingNotifier {
    fn apply_filter(&mut self, region: &RegionId) -> Result<(), NotifierError> {
        self.calls.push(NotifierCall::Apply(region.clone()));
        self.answer()
    }

    fn clear_filter(&mut self) -> Result<(), NotifierError> {
        self.calls.push(NotifierCall::Clear);
        self.answer()
    }
}
