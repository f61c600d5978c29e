//! Click-driven focus state for a single globe view.
//!
//! The view owns one [`SelectionState`] and hands it to [`SelectionToggle`]
//! together with its camera and notifier on every click:
//!
//! - `Overview` + click R: focus R (camera flies to R's centroid, rotation stops, host filters on R)
//! - `Focused(R)` + click R: back to overview (camera pulls out, rotation resumes)
//! - `Focused(R)` + click Q: focus Q directly
//! - `Focused(R)` + background click: back to overview
//! - `Overview` + background click: nothing

use foundation::RegionId;
use tracing::{debug, warn};

use crate::camera::{CameraController, CameraTarget};
use crate::centroid::{FocusError, region_centroid};
use crate::config::{DeselectPolicy, FocusConfig};
use crate::notifier::{NotifierError, SelectionNotifier};
use crate::region::Region;

/// Which region, if any, the view is zoomed in on.
///
/// The view is zoomed exactly when a region is focused; there is no
/// separate flag to drift out of sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    focused: Option<RegionId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&RegionId> {
        self.focused.as_ref()
    }

    pub fn is_zoomed(&self) -> bool {
        self.focused.is_some()
    }

    pub fn is_focused_on(&self, id: &RegionId) -> bool {
        self.focused.as_ref() == Some(id)
    }
}

/// Outcome of one click.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Focused {
        region: RegionId,
        previous: Option<RegionId>,
        target: CameraTarget,
    },
    Reset {
        region: RegionId,
        target: CameraTarget,
    },
    Unchanged,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionToggle {
    config: FocusConfig,
}

impl SelectionToggle {
    pub fn new(config: FocusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    /// Handles a click on `region`.
    ///
    /// Fails only when a focus transition needs the region's centroid and
    /// the boundary has none; `state`, the camera, and the notifier are left
    /// untouched in that case.
    pub fn on_region_click<C, N>(
        &self,
        state: &mut SelectionState,
        region: &Region,
        camera: &mut C,
        notifier: &mut N,
    ) -> Result<Transition, FocusError>
    where
        C: CameraController + ?Sized,
        N: SelectionNotifier + ?Sized,
    {
        if state.is_focused_on(&region.id) {
            return Ok(self.reset(state, camera, notifier));
        }

        let focus = region_centroid(region).inspect_err(|err| {
            warn!(region = %region.id, error = %err, "cannot focus region");
        })?;

        let target = CameraTarget::over(focus, self.config.focus_altitude);
        camera.set_auto_rotate(false);
        camera.fly_to(target, self.config.focus_duration());

        let previous = state.focused.replace(region.id.clone());
        debug!(region = %region.id, previous = ?previous, "focused region");

        if let Err(err) = notifier.apply_filter(&region.id) {
            log_notifier_error(Some(&region.id), &err);
        }

        Ok(Transition::Focused {
            region: region.id.clone(),
            previous,
            target,
        })
    }

    /// Handles a click that hit no region inside the view.
    pub fn on_background_click<C, N>(
        &self,
        state: &mut SelectionState,
        camera: &mut C,
        notifier: &mut N,
    ) -> Transition
    where
        C: CameraController + ?Sized,
        N: SelectionNotifier + ?Sized,
    {
        if !state.is_zoomed() {
            return Transition::Unchanged;
        }
        self.reset(state, camera, notifier)
    }

    fn reset<C, N>(&self, state: &mut SelectionState, camera: &mut C, notifier: &mut N) -> Transition
    where
        C: CameraController + ?Sized,
        N: SelectionNotifier + ?Sized,
    {
        let Some(region) = state.focused.take() else {
            return Transition::Unchanged;
        };

        let target = camera
            .point_of_view()
            .with_altitude(self.config.overview_altitude);
        camera.set_auto_rotate(true);
        camera.fly_to(target, self.config.reset_duration());
        debug!(region = %region, "reset to overview");

        if self.config.deselect_policy == DeselectPolicy::ClearFilter
            && let Err(err) = notifier.clear_filter()
        {
            log_notifier_error(None, &err);
        }

        Transition::Reset { region, target }
    }
}

fn log_notifier_error(region: Option<&RegionId>, err: &NotifierError) {
    match err {
        NotifierError::CapabilityUnavailable => {
            debug!(region = ?region.map(RegionId::as_str), "no host to notify");
        }
        NotifierError::Rejected(_) => {
            warn!(region = ?region.map(RegionId::as_str), error = %err, "host filter not applied");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionState, SelectionToggle, Transition};
    use crate::camera::CameraTarget;
    use crate::centroid::FocusError;
    use crate::config::{DeselectPolicy, FocusConfig};
    use crate::notifier::{DetachedNotifier, NotifierError};
    use crate::recording::{CameraCall, NotifierCall, RecordingCamera, RecordingNotifier};
    use crate::region::{Boundary, Region};
    use foundation::{LonLat, RegionId};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn square(name: &str, lon: f64, lat: f64) -> Region {
        Region::new(
            name,
            Boundary::SingleRing(vec![
                LonLat::new(lon - 1.0, lat - 1.0),
                LonLat::new(lon + 1.0, lat - 1.0),
                LonLat::new(lon + 1.0, lat + 1.0),
                LonLat::new(lon - 1.0, lat + 1.0),
            ]),
        )
    }

    fn fixture() -> (SelectionToggle, SelectionState, RecordingCamera, RecordingNotifier) {
        let cfg = FocusConfig::default();
        let camera = RecordingCamera::new(cfg.initial_view());
        (
            SelectionToggle::new(cfg),
            SelectionState::new(),
            camera,
            RecordingNotifier::default(),
        )
    }

    #[test]
    fn starts_in_overview() {
        let state = SelectionState::new();
        assert!(!state.is_zoomed());
        assert_eq!(state.focused(), None);
    }

    #[test]
    fn first_click_focuses_and_notifies() {
        let (toggle, mut state, mut camera, mut notifier) = fixture();
        let alpha = square("Alpha", 20.0, 10.0);

        let t = toggle
            .on_region_click(&mut state, &alpha, &mut camera, &mut notifier)
            .unwrap();

        let target = CameraTarget::new(10.0, 20.0, 0.7);
        assert_eq!(
            t,
            Transition::Focused {
                region: RegionId::from("Alpha"),
                previous: None,
                target,
            }
        );
        assert!(state.is_focused_on(&RegionId::from("Alpha")));
        assert!(state.is_zoomed());
        assert_eq!(
            camera.calls,
            vec![
                CameraCall::AutoRotate(false),
                CameraCall::FlyTo(target, Some(Duration::from_millis(2000))),
            ]
        );
        assert_eq!(notifier.calls, vec![NotifierCall::Apply(RegionId::from("Alpha"))]);
    }

    #[test]
    fn second_click_on_same_region_returns_to_overview() {
        let (toggle, mut state, mut camera, mut notifier) = fixture();
        let alpha = square("Alpha", 20.0, 10.0);

        toggle
            .on_region_click(&mut state, &alpha, &mut camera, &mut notifier)
            .unwrap();
        let t = toggle
            .on_region_click(&mut state, &alpha, &mut camera, &mut notifier)
            .unwrap();

        let reset_target = CameraTarget::new(10.0, 20.0, 3.0);
        assert_eq!(
            t,
            Transition::Reset {
                region: RegionId::from("Alpha"),
                target: reset_target,
            }
        );
        assert_eq!(state, SelectionState::new());
        assert_eq!(
            &camera.calls[2..],
            &[
                CameraCall::AutoRotate(true),
                CameraCall::FlyTo(reset_target, Some(Duration::from_millis(1000))),
            ]
        );
        // Silent policy: only the focus notification.
        assert_eq!(notifier.calls.len(), 1);
    }

    #[test]
    fn clear_filter_policy_notifies_on_deselect() {
        let cfg = FocusConfig {
            deselect_policy: DeselectPolicy::ClearFilter,
            ..FocusConfig::default()
        };
        let toggle = SelectionToggle::new(cfg.clone());
        let mut state = SelectionState::new();
        let mut camera = RecordingCamera::new(cfg.initial_view());
        let mut notifier = RecordingNotifier::default();
        let alpha = square("Alpha", 0.0, 0.0);

        toggle
            .on_region_click(&mut state, &alpha, &mut camera, &mut notifier)
            .unwrap();
        toggle
            .on_region_click(&mut state, &alpha, &mut camera, &mut notifier)
            .unwrap();

        assert_eq!(
            notifier.calls,
            vec![NotifierCall::Apply(RegionId::from("Alpha")), NotifierCall::Clear]
        );
    }

    #[test]
    fn clicking_another_region_switches_focus_directly() {
        let (toggle, mut state, mut camera, mut notifier) = fixture();
        let alpha = square("Alpha", 20.0, 10.0);
        let beta = square("Beta", -40.0, -5.0);

        toggle
            .on_region_click(&mut state, &alpha, &mut camera, &mut notifier)
            .unwrap();
        let t = toggle
            .on_region_click(&mut state, &beta, &mut camera, &mut notifier)
            .unwrap();

        assert!(matches!(
            t,
            Transition::Focused { ref region, previous: Some(ref prev), .. }
                if region.as_str() == "Beta" && prev.as_str() == "Alpha"
        ));
        assert!(state.is_focused_on(&RegionId::from("Beta")));
        assert!(!camera.calls.contains(&CameraCall::AutoRotate(true)));
    }

    #[test]
    fn distinct_clicks_end_on_last_region_with_one_notification_each() {
        let (toggle, mut state, mut camera, mut notifier) = fixture();
        let regions: Vec<Region> = ["R1", "R2", "R3", "R4", "R5"]
            .iter()
            .enumerate()
            .map(|(i, name)| square(name, i as f64 * 10.0, 0.0))
            .collect();

        for r in &regions {
            let t = toggle
                .on_region_click(&mut state, r, &mut camera, &mut notifier)
                .unwrap();
            assert!(matches!(t, Transition::Focused { .. }));
        }

        assert!(state.is_focused_on(&RegionId::from("R5")));
        let expected: Vec<NotifierCall> = regions
            .iter()
            .map(|r| NotifierCall::Apply(r.id.clone()))
            .collect();
        assert_eq!(notifier.calls, expected);
        assert!(!camera.calls.contains(&CameraCall::AutoRotate(true)));
    }

    #[test]
    fn background_click_resets_focus() {
        let (toggle, mut state, mut camera, mut notifier) = fixture();
        toggle
            .on_region_click(&mut state, &square("Alpha", 5.0, 5.0), &mut camera, &mut notifier)
            .unwrap();

        let t = toggle.on_background_click(&mut state, &mut camera, &mut notifier);

        assert!(matches!(t, Transition::Reset { ref region, .. } if region.as_str() == "Alpha"));
        assert!(!state.is_zoomed());
        assert_eq!(
            camera.calls.last(),
            Some(&CameraCall::FlyTo(
                CameraTarget::new(5.0, 5.0, 3.0),
                Some(Duration::from_millis(1000)),
            ))
        );
    }

    #[test]
    fn background_click_in_overview_does_nothing() {
        let (toggle, mut state, mut camera, mut notifier) = fixture();
        let t = toggle.on_background_click(&mut state, &mut camera, &mut notifier);
        assert_eq!(t, Transition::Unchanged);
        assert!(camera.calls.is_empty());
        assert!(notifier.calls.is_empty());
    }

    #[test]
    fn empty_boundary_leaves_everything_untouched() {
        let (toggle, mut state, mut camera, mut notifier) = fixture();
        let alpha = square("Alpha", 0.0, 0.0);
        toggle
            .on_region_click(&mut state, &alpha, &mut camera, &mut notifier)
            .unwrap();
        let before_calls = camera.calls.len();

        let ghost = Region::new("Ghost", Boundary::MultipleRings(vec![Vec::new()]));
        let err = toggle
            .on_region_click(&mut state, &ghost, &mut camera, &mut notifier)
            .unwrap_err();

        assert_eq!(
            err,
            FocusError::InvalidGeometry {
                region: Some(RegionId::from("Ghost"))
            }
        );
        assert!(state.is_focused_on(&RegionId::from("Alpha")));
        assert_eq!(camera.calls.len(), before_calls);
        assert_eq!(notifier.calls.len(), 1);
    }

    #[test]
    fn rejected_notification_still_moves_camera() {
        let (toggle, mut state, mut camera, _) = fixture();
        let mut notifier = RecordingNotifier::failing(NotifierError::Rejected("nope".into()));

        let t = toggle
            .on_region_click(&mut state, &square("Alpha", 1.0, 2.0), &mut camera, &mut notifier)
            .unwrap();

        assert!(matches!(t, Transition::Focused { .. }));
        assert!(state.is_zoomed());
        assert_eq!(camera.calls.len(), 2);
        assert_eq!(notifier.calls.len(), 1);
    }

    #[test]
    fn works_without_a_host() {
        let (toggle, mut state, mut camera, _) = fixture();
        let alpha = square("Alpha", 1.0, 2.0);
        toggle
            .on_region_click(&mut state, &alpha, &mut camera, &mut DetachedNotifier)
            .unwrap();
        toggle
            .on_region_click(&mut state, &alpha, &mut camera, &mut DetachedNotifier)
            .unwrap();
        assert!(!state.is_zoomed());
        assert_eq!(camera.calls.len(), 4);
    }
}
