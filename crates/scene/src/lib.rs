pub mod camera;
pub mod centroid;
pub mod config;
pub mod notifier;
pub mod points;
pub mod recording;
pub mod region;
pub mod selection;

pub use camera::*;
pub use centroid::*;
pub use config::*;
pub use notifier::*;
pub use region::*;
pub use selection::*;
