//! Region boundaries from a GeoJSON FeatureCollection.
//!
//! Only `Polygon` and `MultiPolygon` features become regions; features with
//! a null geometry or any other geometry type are skipped. The exterior
//! ring of each polygon is kept and holes are dropped, since the boundary
//! only feeds the focus centroid. A malformed feature is logged and skipped
//! so the remaining regions stay usable.

use std::collections::HashMap;

use foundation::{LonLat, RegionId};
use scene::{Boundary, Region};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Property keys tried, in order, for a region's display name.
const NAME_KEYS: [&str; 2] = ["ADMIN", "NAME"];

#[derive(Debug)]
pub enum RegionSourceError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for RegionSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionSourceError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            RegionSourceError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for RegionSourceError {}

/// Loaded regions, addressable by name.
#[derive(Debug, Clone, Default)]
pub struct RegionCollection {
    regions: Vec<Region>,
    by_id: HashMap<RegionId, usize>,
}

impl RegionCollection {
    pub fn new(regions: Vec<Region>) -> Self {
        let mut out = Self::default();
        for region in regions {
            out.push(region);
        }
        out
    }

    pub fn from_geojson_str(payload: &str) -> Result<Self, RegionSourceError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| RegionSourceError::InvalidFeature {
                index: 0,
                reason: format!("JSON parse error: {e}"),
            })?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, RegionSourceError> {
        let features = value
            .as_object()
            .filter(|obj| obj.get("type").and_then(Value::as_str) == Some("FeatureCollection"))
            .and_then(|obj| obj.get("features"))
            .and_then(Value::as_array)
            .ok_or(RegionSourceError::NotAFeatureCollection)?;

        let mut out = Self::default();
        let mut skipped = 0usize;
        for (index, feat_val) in features.iter().enumerate() {
            match parse_feature(feat_val) {
                Ok(Some(region)) => out.push(region),
                Ok(None) => skipped += 1,
                Err(reason) => {
                    let err = RegionSourceError::InvalidFeature { index, reason };
                    warn!(error = %err, "skipping malformed feature");
                    skipped += 1;
                }
            }
        }

        info!(regions = out.len(), skipped, "loaded region boundaries");
        Ok(out)
    }

    pub fn get(&self, id: &RegionId) -> Option<&Region> {
        self.by_id.get(id).map(|&i| &self.regions[i])
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Region> {
        self.get(&RegionId::from(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> + '_ {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    fn push(&mut self, region: Region) {
        if self.by_id.contains_key(&region.id) {
            warn!(region = %region.id, "duplicate region name; keeping the first");
            return;
        }
        self.by_id.insert(region.id.clone(), self.regions.len());
        self.regions.push(region);
    }
}

/// `Ok(None)` for features that are valid GeoJSON but not a named polygon.
fn parse_feature(feat_val: &Value) -> Result<Option<Region>, String> {
    let feat_obj = feat_val
        .as_object()
        .ok_or("feature must be an object".to_string())?;
    let geometry = match feat_obj.get("geometry") {
        None | Some(Value::Null) => return Ok(None),
        Some(g) => g,
    };
    let Some(boundary) = parse_boundary(geometry)? else {
        return Ok(None);
    };
    let Some(id) = region_name(feat_obj) else {
        debug!("skipping unnamed feature");
        return Ok(None);
    };
    Ok(Some(Region::new(id, boundary)))
}

fn region_name(feat_obj: &Map<String, Value>) -> Option<RegionId> {
    let props = feat_obj.get("properties").and_then(Value::as_object);
    let from_props = props.and_then(|p| {
        NAME_KEYS
            .iter()
            .filter_map(|k| p.get(*k).and_then(Value::as_str))
            .find(|s| !s.trim().is_empty())
            .map(str::to_string)
    });
    let name = from_props.or_else(|| match feat_obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })?;
    Some(RegionId::from(name))
}

/// `Ok(None)` for geometry types that cannot be a region.
fn parse_boundary(value: &Value) -> Result<Option<Boundary>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    if ty != "Polygon" && ty != "MultiPolygon" {
        return Ok(None);
    }

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => Ok(Some(Boundary::SingleRing(exterior_ring(coords)?))),
        _ => {
            let polys = coords
                .as_array()
                .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
            let mut rings = Vec::with_capacity(polys.len());
            for poly in polys {
                rings.push(exterior_ring(poly)?);
            }
            Ok(Some(Boundary::MultipleRings(rings)))
        }
    }
}

fn exterior_ring(coords: &Value) -> Result<Vec<LonLat>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    match rings.first() {
        Some(ring) => parse_ring(ring),
        None => Ok(Vec::new()),
    }
}

fn parse_ring(coords: &Value) -> Result<Vec<LonLat>, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_position(item)?);
    }
    Ok(out)
}

fn parse_position(coords: &Value) -> Result<LonLat, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0]
        .as_f64()
        .ok_or("position lon must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or("position lat must be a number".to_string())?;
    Ok(LonLat::new(lon, lat))
}

#[cfg(test)]
mod tests {
    use super::{RegionCollection, RegionSourceError};
    use foundation::{LonLat, RegionId};
    use pretty_assertions::assert_eq;
    use scene::{Boundary, Region, centroid};

    const COUNTRIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "ADMIN": "Squareland", "NAME": "Square" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[10, 0], [10, 10], [0, 10], [0, 0]],
                        [[4, 4], [6, 4], [6, 6]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "NAME": "Archipelago" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0, 0], [0, 2]]],
                        [[[10, 10], [10, 12]]]
                    ]
                }
            },
            { "type": "Feature", "properties": { "ADMIN": "Nowhere" }, "geometry": null },
            {
                "type": "Feature",
                "properties": { "ADMIN": "Capital" },
                "geometry": { "type": "Point", "coordinates": [1, 1] }
            },
            {
                "type": "Feature",
                "id": 42,
                "properties": {},
                "geometry": { "type": "Polygon", "coordinates": [[[1, 1], [3, 3]]] }
            }
        ]
    }"#;

    #[test]
    fn keeps_polygon_features_only() {
        let regions = RegionCollection::from_geojson_str(COUNTRIES).unwrap();
        let names: Vec<&str> = regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(names, vec!["Squareland", "Archipelago", "42"]);
        assert!(regions.get_by_name("Nowhere").is_none());
        assert!(regions.get_by_name("Capital").is_none());
    }

    #[test]
    fn polygon_keeps_exterior_ring_only() {
        let regions = RegionCollection::from_geojson_str(COUNTRIES).unwrap();
        let square = regions.get_by_name("Squareland").unwrap();
        match &square.boundary {
            Boundary::SingleRing(ring) => {
                assert_eq!(ring.len(), 4);
                assert_eq!(ring[0], LonLat::new(10.0, 0.0));
            }
            other => panic!("unexpected boundary {other:?}"),
        }
        let c = centroid(&square.boundary).unwrap();
        assert_eq!((c.lon_deg, c.lat_deg), (5.0, 5.0));
    }

    #[test]
    fn multipolygon_becomes_multiple_rings() {
        let regions = RegionCollection::from_geojson_str(COUNTRIES).unwrap();
        let arch = regions.get_by_name("Archipelago").unwrap();
        assert_eq!(arch.boundary.ring_count(), 2);
        let c = centroid(&arch.boundary).unwrap();
        assert_eq!((c.lon_deg, c.lat_deg), (5.0, 6.0));
    }

    #[test]
    fn duplicate_names_keep_the_first() {
        let payload = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"ADMIN": "Twin"},
             "geometry": {"type": "Polygon", "coordinates": [[[0, 0]]]}},
            {"type": "Feature", "properties": {"ADMIN": "Twin"},
             "geometry": {"type": "Polygon", "coordinates": [[[9, 9]]]}}
        ]}"#;
        let regions = RegionCollection::from_geojson_str(payload).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(
            regions.get_by_name("Twin").unwrap().boundary,
            Boundary::SingleRing(vec![LonLat::new(0.0, 0.0)])
        );
    }

    #[test]
    fn rejects_non_collections() {
        let err = RegionCollection::from_geojson_str(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(err, RegionSourceError::NotAFeatureCollection));
    }

    #[test]
    fn malformed_features_are_skipped() {
        let payload = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"ADMIN": "Bad"},
             "geometry": {"type": "Polygon", "coordinates": [[["x", 0]]]}},
            "not a feature",
            {"type": "Feature", "properties": {"ADMIN": "Broken"},
             "geometry": {"type": "MultiPolygon", "coordinates": 7}},
            {"type": "Feature", "properties": {"ADMIN": "Good"},
             "geometry": {"type": "Polygon", "coordinates": [[[2, 4], [4, 8]]]}}
        ]}"#;
        let regions = RegionCollection::from_geojson_str(payload).unwrap();
        let names: Vec<&str> = regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(names, vec!["Good"]);
        assert!(regions.get_by_name("Bad").is_none());
    }

    #[test]
    fn unparsable_json_is_an_error() {
        let err = RegionCollection::from_geojson_str("{not json").unwrap_err();
        assert!(matches!(err, RegionSourceError::InvalidFeature { index: 0, .. }));
    }

    #[test]
    fn new_indexes_caller_supplied_regions() {
        let regions = RegionCollection::new(vec![
            Region::new("Alpha", Boundary::SingleRing(vec![LonLat::new(1.0, 2.0)])),
            Region::new("Beta", Boundary::MultipleRings(vec![vec![LonLat::new(3.0, 4.0)]])),
            Region::new("Alpha", Boundary::SingleRing(vec![LonLat::new(9.0, 9.0)])),
        ]);
        assert_eq!(regions.len(), 2);
        assert!(!regions.is_empty());
        assert_eq!(
            regions.get(&RegionId::from("Alpha")).unwrap().boundary,
            Boundary::SingleRing(vec![LonLat::new(1.0, 2.0)])
        );
        assert_eq!(regions.get_by_name("Beta").unwrap().boundary.ring_count(), 1);
        assert!(RegionCollection::new(Vec::new()).is_empty());
    }
}
