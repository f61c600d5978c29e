//! Library side of the `globe-focus` command: region listings and click
//! replays against recording collaborators.

use formats::RegionCollection;
use scene::recording::{RecordingCamera, RecordingNotifier};
use scene::{FocusConfig, SelectionState, SelectionToggle, Transition, centroid};
use serde::Serialize;
use tracing::warn;

/// Click argument meaning "background, no region hit".
pub const BACKGROUND_CLICK: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub name: String,
    pub rings: usize,
    pub points: usize,
    /// `None` when the boundary has no coordinates.
    pub centroid_lat_deg: Option<f64>,
    pub centroid_lon_deg: Option<f64>,
}

pub fn summarize_regions(regions: &RegionCollection) -> Vec<RegionSummary> {
    regions
        .iter()
        .map(|r| {
            let c = centroid(&r.boundary).ok();
            RegionSummary {
                name: r.id.to_string(),
                rings: r.boundary.ring_count(),
                points: r.boundary.coordinates().count(),
                centroid_lat_deg: c.map(|c| c.lat_deg),
                centroid_lon_deg: c.map(|c| c.lon_deg),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Focused {
        region: String,
        lat_deg: f64,
        lon_deg: f64,
        altitude: f64,
    },
    Reset {
        region: String,
        altitude: f64,
    },
    Unchanged,
    UnknownRegion,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStep {
    pub click: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
    /// Region focused after this click, if any.
    pub focused: Option<String>,
    pub host_calls: usize,
}

/// Replays `clicks` from the overview state.
///
/// Each click is a region name or [`BACKGROUND_CLICK`]. Names not present in
/// `regions` are reported and otherwise ignored.
pub fn replay(regions: &RegionCollection, clicks: &[String], config: FocusConfig) -> Vec<ReplayStep> {
    let mut camera = RecordingCamera::new(config.initial_view());
    let mut notifier = RecordingNotifier::default();
    let toggle = SelectionToggle::new(config);
    let mut state = SelectionState::new();

    let mut steps = Vec::with_capacity(clicks.len());
    for click in clicks {
        let outcome = if click == BACKGROUND_CLICK {
            outcome_of(toggle.on_background_click(&mut state, &mut camera, &mut notifier))
        } else if let Some(region) = regions.get_by_name(click) {
            match toggle.on_region_click(&mut state, region, &mut camera, &mut notifier) {
                Ok(t) => outcome_of(t),
                Err(err) => StepOutcome::Failed {
                    reason: err.to_string(),
                },
            }
        } else {
            warn!(click = %click, "no such region");
            StepOutcome::UnknownRegion
        };

        steps.push(ReplayStep {
            click: click.clone(),
            outcome,
            focused: state.focused().map(|id| id.to_string()),
            host_calls: notifier.calls.len(),
        });
    }
    steps
}

fn outcome_of(t: Transition) -> StepOutcome {
    match t {
        Transition::Focused { region, target, .. } => StepOutcome::Focused {
            region: region.to_string(),
            lat_deg: target.lat_deg,
            lon_deg: target.lon_deg,
            altitude: target.altitude,
        },
        Transition::Reset { region, target } => StepOutcome::Reset {
            region: region.to_string(),
            altitude: target.altitude,
        },
        Transition::Unchanged => StepOutcome::Unchanged,
    }
}
