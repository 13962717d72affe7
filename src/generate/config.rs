use crate::core::error::{GraphError, Result};

pub const DEFAULT_POINT_COUNT: usize = 1000;
pub const DEFAULT_BOUNDS: (f64, f64) = (0.0, 1023.0);
pub const DEFAULT_DEGREE_RANGE: (usize, usize) = (5, 15);

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub point_count: usize,
    /// Inclusive range every coordinate is drawn from.
    pub bounds: (f64, f64),
    /// Inclusive range each node's neighbor count is drawn from.
    pub degree_range: (usize, usize),
    /// Seed for a reproducible run; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            bounds: DEFAULT_BOUNDS,
            degree_range: DEFAULT_DEGREE_RANGE,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Neighbor queries include the query point itself, so the largest
    /// degree may not exceed the point count.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.bounds;
        if !min.is_finite() || !max.is_finite() || min > max || !(max - min).is_finite() {
            return Err(GraphError::range(format!(
                "invalid coordinate bounds [{min}, {max}]"
            )));
        }

        let (lo, hi) = self.degree_range;
        if lo > hi {
            return Err(GraphError::range(format!("invalid degree range [{lo}, {hi}]")));
        }
        if self.point_count > 0 && hi > self.point_count {
            return Err(GraphError::range(format!(
                "degree up to {hi} requested but only {} points exist",
                self.point_count
            )));
        }
        Ok(())
    }
}
