//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::DriverProfile;

/// Query for a group's day bounds.
#[derive(Debug, Deserialize)]
pub struct TimesQuery {
    /// Group display name
    pub group: String,

    /// Day in YYYY-MM-DD format
    pub date: String,
}

/// First start and last end of a day, `null` when there are no lessons.
#[derive(Debug, PartialEq, Serialize)]
pub struct TimesResponse {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// All group names.
#[derive(Debug, Serialize)]
pub struct GroupListResponse {
    pub groups: Vec<String>,
}

/// Request to register a driver.
#[derive(Debug, Deserialize)]
pub struct RegisterDriverRequest {
    pub name: String,

    /// Group display name
    pub group: String,

    pub latitude: f64,
    pub longitude: f64,
}

/// A driver profile as returned to clients.
#[derive(Debug, PartialEq, Serialize)]
pub struct DriverView {
    pub name: String,
    pub group: String,
    pub latitude: f64,
    pub longitude: f64,
    pub enabled: bool,
    pub cost: f64,
    pub contact: String,
    pub ellipse_width: u8,
    pub ellipse_length: u8,
    pub ellipse_position: u8,
}

impl From<&DriverProfile> for DriverView {
    fn from(driver: &DriverProfile) -> Self {
        Self {
            name: driver.name.clone(),
            group: driver.group.name.clone(),
            latitude: driver.home.latitude,
            longitude: driver.home.longitude,
            enabled: driver.enabled,
            cost: driver.cost,
            contact: driver.contact.clone(),
            ellipse_width: driver.zone.width_pct(),
            ellipse_length: driver.zone.length_pct(),
            ellipse_position: driver.zone.offset_pct(),
        }
    }
}

/// Query for possible shared trips.
#[derive(Debug, Deserialize)]
pub struct TripsQuery {
    /// Day in YYYY-MM-DD format
    pub date: String,

    /// Rider's group display name
    pub group: String,

    /// Rider's home
    pub latitude: f64,
    pub longitude: f64,

    /// Rider's own driver name, if any, so they are not matched with themselves
    pub rider: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
