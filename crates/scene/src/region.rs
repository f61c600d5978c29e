use foundation::{LonLat, RegionId};

/// Boundary geometry of a region.
///
/// Rings are kept exactly as loaded; nothing here closes, reorders, or
/// validates them.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    SingleRing(Vec<LonLat>),
    /// One ring per disjoint part (islands, exclaves).
    MultipleRings(Vec<Vec<LonLat>>),
}

impl Boundary {
    /// Iterates every coordinate pair across all rings, in ring order.
    pub fn coordinates(&self) -> Box<dyn Iterator<Item = &LonLat> + '_> {
        match self {
            Boundary::SingleRing(ring) => Box::new(ring.iter()),
            Boundary::MultipleRings(rings) => Box::new(rings.iter().flatten()),
        }
    }

    pub fn ring_count(&self) -> usize {
        match self {
            Boundary::SingleRing(_) => 1,
            Boundary::MultipleRings(rings) => rings.len(),
        }
    }
}

/// A named area on the globe. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub boundary: Boundary,
}

impl Region {
    pub fn new(id: impl Into<RegionId>, boundary: Boundary) -> Self {
        Self {
            id: id.into(),
            boundary,
        }
    }
}
