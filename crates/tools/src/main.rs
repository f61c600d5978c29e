use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use formats::RegionCollection;
use scene::{DeselectPolicy, FocusConfig};
use tools::{StepOutcome, replay, summarize_regions};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "globe-focus", about = "Inspect globe regions and replay focus clicks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List regions with their focus centroids.
    Regions {
        geojson: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Replay clicks from the overview state. Use `-` for a background click.
    Replay {
        geojson: PathBuf,
        #[arg(required = true, allow_hyphen_values = true)]
        clicks: Vec<String>,
        /// JSON file with focus settings; missing keys keep their defaults.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Clear the host filter when the focused region is clicked again.
        #[arg(long)]
        clear_on_deselect: bool,
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    match Cli::parse().command {
        Command::Regions { geojson, json } => cmd_regions(&geojson, json),
        Command::Replay {
            geojson,
            clicks,
            config,
            clear_on_deselect,
            json,
        } => {
            let mut config = match config {
                Some(path) => load_config(&path)?,
                None => FocusConfig::default(),
            };
            if clear_on_deselect {
                config.deselect_policy = DeselectPolicy::ClearFilter;
            }
            cmd_replay(&geojson, &clicks, config, json)
        }
    }
}

fn load_regions(path: &Path) -> Result<RegionCollection, String> {
    let payload = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    RegionCollection::from_geojson_str(&payload).map_err(|e| format!("parse {path:?}: {e}"))
}

fn load_config(path: &Path) -> Result<FocusConfig, String> {
    let payload = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    serde_json::from_str(&payload).map_err(|e| format!("config {path:?}: {e}"))
}

fn cmd_regions(geojson: &Path, json: bool) -> Result<(), String> {
    let regions = load_regions(geojson)?;
    let summaries = summarize_regions(&regions);

    if json {
        let payload = serde_json::to_string_pretty(&summaries).map_err(|e| format!("json: {e}"))?;
        println!("{payload}");
        return Ok(());
    }

    for s in &summaries {
        match (s.centroid_lat_deg, s.centroid_lon_deg) {
            (Some(lat), Some(lon)) => println!(
                "{}\trings={}\tpoints={}\tlat={lat:.4}\tlon={lon:.4}",
                s.name, s.rings, s.points
            ),
            _ => println!("{}\trings={}\tpoints=0\t(no centroid)", s.name, s.rings),
        }
    }
    eprintln!("{} regions", summaries.len());
    Ok(())
}

fn cmd_replay(
    geojson: &Path,
    clicks: &[String],
    config: FocusConfig,
    json: bool,
) -> Result<(), String> {
    let regions = load_regions(geojson)?;
    let steps = replay(&regions, clicks, config);

    if json {
        let payload = serde_json::to_string_pretty(&steps).map_err(|e| format!("json: {e}"))?;
        println!("{payload}");
        return Ok(());
    }

    for step in &steps {
        let what = match &step.outcome {
            StepOutcome::Focused {
                region,
                lat_deg,
                lon_deg,
                altitude,
            } => format!("focus {region} at lat={lat_deg:.4} lon={lon_deg:.4} alt={altitude}"),
            StepOutcome::Reset { region, altitude } => {
                format!("reset from {region} to alt={altitude}")
            }
            StepOutcome::Unchanged => "unchanged".to_string(),
            StepOutcome::UnknownRegion => "unknown region".to_string(),
            StepOutcome::Failed { reason } => format!("failed: {reason}"),
        };
        println!(
            "{:<24} {what}  [focused={}, host_calls={}]",
            step.click,
            step.focused.as_deref().unwrap_or("-"),
            step.host_calls
        );
    }
    Ok(())
}
