//! Bounding box types for spatial queries.

use serde::{Deserialize, Serialize};

/// Optional rectangular bounds on a lat/lon query.
///
/// All four edges are independently optional; an omitted edge defaults to
/// the dataset's own extent along that axis at selection time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundsQuery {
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
}

impl BoundsQuery {
    pub fn new(
        lat_min: Option<f64>,
        lat_max: Option<f64>,
        lon_min: Option<f64>,
        lon_max: Option<f64>,
    ) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Whether no edge is constrained.
    pub fn is_unbounded(&self) -> bool {
        self.lat_min.is_none()
            && self.lat_max.is_none()
            && self.lon_min.is_none()
            && self.lon_max.is_none()
    }

    /// Stable key component for caching, distinguishing omitted edges.
    pub fn cache_key(&self) -> String {
        fn edge(v: Option<f64>) -> String {
            v.map(|x| x.to_string()).unwrap_or_else(|| "None".to_string())
        }
        format!(
            "{}|{}|{}|{}",
            edge(self.lat_min),
            edge(self.lat_max),
            edge(self.lon_min),
            edge(self.lon_max)
        )
    }
}
