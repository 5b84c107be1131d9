//! Shared trip matching.
//!
//! A rider can share a driver's trip to the anchor when the rider's home is
//! inside the driver's reachability zone and their day starts at the same
//! time. The trip home is matched the same way on the day's end.

use chrono::NaiveDate;
use futures::future::join_all;
use serde::Serialize;
use tracing::debug;

use crate::cache::{DaySchedule, ScheduleCache, ScheduleError};
use crate::domain::{DriverProfile, GeoPoint, GroupId};
use crate::reachability::is_reachable;
use crate::untis::TimetableProvider;

/// The person looking for a ride.
#[derive(Debug, Clone)]
pub struct Rider {
    /// Set when the rider is also a registered driver, to skip themselves.
    pub name: Option<String>,
    pub group: GroupId,
    pub home: GeoPoint,
}

/// A driver offer as shown to the rider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub name: String,
    pub cost: f64,
    pub contact: String,
}

impl From<&DriverProfile> for Trip {
    fn from(driver: &DriverProfile) -> Self {
        Self {
            name: driver.name.clone(),
            cost: driver.cost,
            contact: driver.contact.clone(),
        }
    }
}

/// Matching drivers for the morning and afternoon trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trips {
    pub start: Vec<Trip>,
    pub end: Vec<Trip>,
}

/// Find drivers whose zone covers the rider and whose day lines up.
///
/// Driver schedules are looked up concurrently. A day without lessons on
/// either side never matches.
pub async fn find_trips<P: TimetableProvider>(
    cache: &ScheduleCache<P>,
    anchor: &GeoPoint,
    rider: &Rider,
    date: NaiveDate,
    drivers: &[DriverProfile],
) -> Result<Trips, ScheduleError> {
    let DaySchedule::Active(rider_day) = cache.bounds_for(rider.group, date).await? else {
        debug!(group = %rider.group, %date, "rider has no lessons, no trips");
        return Ok(Trips::default());
    };

    let candidates: Vec<&DriverProfile> = drivers
        .iter()
        .filter(|d| d.enabled)
        .filter(|d| rider.name.as_deref() != Some(d.name.as_str()))
        .filter(|d| is_reachable(&rider.home, anchor, &d.home, &d.zone))
        .collect();

    debug!(candidates = candidates.len(), "drivers in range");

    let schedules = join_all(
        candidates
            .iter()
            .map(|d| cache.bounds_for(d.group.id, date)),
    )
    .await;

    let mut trips = Trips::default();
    for (driver, schedule) in candidates.into_iter().zip(schedules) {
        let Some(driver_day) = schedule?.bounds() else {
            continue;
        };
        if driver_day.start == rider_day.start {
            trips.start.push(Trip::from(driver));
        }
        if driver_day.end == rider_day.end {
            trips.end.push(Trip::from(driver));
        }
    }

    Ok(trips)
}
