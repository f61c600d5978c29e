/// Longitude/latitude pair in degrees, in GeoJSON axis order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

impl From<[f64; 2]> for LonLat {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

/// Camera focus target derived from a region boundary.
///
/// Not persisted; recomputed for every focus transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FocusPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl FocusPoint {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}
