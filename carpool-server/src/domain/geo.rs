//! Planar geographic positions.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair.
///
/// Treated as planar coordinates with no great-circle correction, which is
/// only sound over short distances such as within one town.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint::new(
            (self.latitude + other.latitude) / 2.0,
            (self.longitude + other.longitude) / 2.0,
        )
    }
}
