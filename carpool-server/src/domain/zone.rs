//! Reachability zone parameters.

use serde::Serialize;

use super::error::DomainError;

/// Upper bound shared by all three zone percentages.
pub const MAX_ZONE_PCT: u8 = 100;

/// Ellipse descriptor attached to a driver.
///
/// All three values are percentages of the distance between the anchor
/// and the driver's home, so the absolute size of the zone grows with
/// that distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReachabilityZone {
    width_pct: u8,
    length_pct: u8,
    offset_pct: u8,
}

impl ReachabilityZone {
    /// Build a zone, rejecting any percentage above 100.
    pub fn new(width_pct: u8, length_pct: u8, offset_pct: u8) -> Result<Self, DomainError> {
        if width_pct > MAX_ZONE_PCT {
            return Err(DomainError::InvalidWidth(width_pct.into()));
        }
        if length_pct > MAX_ZONE_PCT {
            return Err(DomainError::InvalidLength(length_pct.into()));
        }
        if offset_pct > MAX_ZONE_PCT {
            return Err(DomainError::InvalidOffset(offset_pct.into()));
        }
        Ok(Self {
            width_pct,
            length_pct,
            offset_pct,
        })
    }

    pub fn width_pct(&self) -> u8 {
        self.width_pct
    }

    pub fn length_pct(&self) -> u8 {
        self.length_pct
    }

    /// 0 centres the ellipse on the driver, 100 on the anchor.
    pub fn offset_pct(&self) -> u8 {
        self.offset_pct
    }
}

impl Default for ReachabilityZone {
    fn default() -> Self {
        Self {
            width_pct: 50,
            length_pct: 100,
            offset_pct: 50,
        }
    }
}

/// Validate a raw percentage, mapping failures through `err`.
pub(crate) fn checked_pct(
    value: i64,
    err: fn(i64) -> DomainError,
) -> Result<u8, DomainError> {
    if (0..=i64::from(MAX_ZONE_PCT)).contains(&value) {
        Ok(value as u8)
    } else {
        Err(err(value))
    }
}
