//! Driver profiles and their partial updates.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::geo::GeoPoint;
use super::group::Group;
use super::zone::{ReachabilityZone, checked_pct};

/// Allowed contact length, in characters.
const CONTACT_LEN: std::ops::RangeInclusive<usize> = 5..=25;

/// A participant offering rides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverProfile {
    pub name: String,
    pub group: Group,
    pub home: GeoPoint,
    pub enabled: bool,
    pub cost: f64,
    pub contact: String,
    pub zone: ReachabilityZone,
}

impl DriverProfile {
    /// A freshly registered driver: disabled, free, default zone.
    pub fn new(name: impl Into<String>, group: Group, home: GeoPoint) -> Self {
        Self {
            name: name.into(),
            group,
            home,
            enabled: false,
            cost: 0.0,
            contact: String::new(),
            zone: ReachabilityZone::default(),
        }
    }
}

/// Partial update of a driver profile.
///
/// Only the fields listed here may change; unknown keys are rejected at
/// deserialization time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverUpdate {
    pub enabled: Option<bool>,
    pub cost: Option<f64>,
    pub contact: Option<String>,
    pub ellipse_width: Option<i64>,
    pub ellipse_length: Option<i64>,
    pub ellipse_position: Option<i64>,
}

impl DriverUpdate {
    /// Validate every present field, then apply them all.
    ///
    /// On error the profile is left untouched.
    pub fn apply_to(&self, profile: &mut DriverProfile) -> Result<(), DomainError> {
        let current = profile.zone;
        let width = match self.ellipse_width {
            Some(w) => checked_pct(w, DomainError::InvalidWidth)?,
            None => current.width_pct(),
        };
        let length = match self.ellipse_length {
            Some(l) => checked_pct(l, DomainError::InvalidLength)?,
            None => current.length_pct(),
        };
        let offset = match self.ellipse_position {
            Some(p) => checked_pct(p, DomainError::InvalidOffset)?,
            None => current.offset_pct(),
        };
        let zone = ReachabilityZone::new(width, length, offset)?;

        if let Some(cost) = self.cost
            && (!cost.is_finite() || cost < 0.0)
        {
            return Err(DomainError::InvalidCost);
        }

        if let Some(contact) = &self.contact
            && !CONTACT_LEN.contains(&contact.chars().count())
        {
            return Err(DomainError::InvalidContact);
        }

        profile.zone = zone;
        if let Some(enabled) = self.enabled {
            profile.enabled = enabled;
        }
        if let Some(cost) = self.cost {
            profile.cost = cost;
        }
        if let Some(contact) = &self.contact {
            profile.contact = contact.clone();
        }
        Ok(())
    }
}
