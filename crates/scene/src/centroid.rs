use foundation::{FocusPoint, RegionId};

use crate::region::{Boundary, Region};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusError {
    /// The boundary has no coordinate pairs, so it has no centroid.
    InvalidGeometry { region: Option<RegionId> },
}

impl std::fmt::Display for FocusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FocusError::InvalidGeometry { region: Some(id) } => {
                write!(f, "region {id} has no boundary coordinates")
            }
            FocusError::InvalidGeometry { region: None } => {
                write!(f, "boundary has no coordinates")
            }
        }
    }
}

impl std::error::Error for FocusError {}

/// Unweighted centroid of every coordinate pair in the boundary.
///
/// All rings are flattened into one sequence and latitudes and longitudes
/// are averaged separately. Ring area, winding, and holes are ignored, and
/// the average is planar: it drifts near the poles and is wrong for
/// boundaries crossing the antimeridian.
pub fn centroid(boundary: &Boundary) -> Result<FocusPoint, FocusError> {
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    let mut count = 0usize;
    for p in boundary.coordinates() {
        lat_sum += p.lat_deg;
        lon_sum += p.lon_deg;
        count += 1;
    }

    if count == 0 {
        return Err(FocusError::InvalidGeometry { region: None });
    }

    let n = count as f64;
    Ok(FocusPoint::new(lat_sum / n, lon_sum / n))
}

/// Same as [`centroid`], with the region named in the error.
pub fn region_centroid(region: &Region) -> Result<FocusPoint, FocusError> {
    centroid(&region.boundary).map_err(|_| FocusError::InvalidGeometry {
        region: Some(region.id.clone()),
    })
}
