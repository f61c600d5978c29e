/// Radius used when no size field is configured or a value is unusable.
pub const DEFAULT_POINT_RADIUS: f64 = 0.3;
pub const MIN_POINT_RADIUS: f64 = 0.2;
pub const MAX_POINT_RADIUS: f64 = 0.8;

/// Linear map from a size field's value domain onto point radii.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RadiusScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl RadiusScale {
    /// Builds a scale spanning the finite values in `values`.
    ///
    /// Returns `None` when there are no finite values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.iter().copied().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            return None;
        }
        Some(Self {
            domain: [min, max],
            range: [MIN_POINT_RADIUS, MAX_POINT_RADIUS],
        })
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn radius(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return DEFAULT_POINT_RADIUS;
        }
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        if span <= 0.0 {
            return 0.5 * (r0 + r1);
        }
        // Unclamped, so out-of-domain values extrapolate.
        r0 + (value - d0) / span * (r1 - r0)
    }
}

/// Radii for a whole point layer; `None` values get the default radius.
pub fn point_radii(values: &[Option<f64>]) -> Vec<f64> {
    let finite: Vec<f64> = values.iter().flatten().copied().collect();
    let Some(scale) = RadiusScale::from_values(&finite) else {
        return vec![DEFAULT_POINT_RADIUS; values.len()];
    };
    values
        .iter()
        .map(|v| v.map_or(DEFAULT_POINT_RADIUS, |v| scale.radius(v)))
        .collect()
}
