//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::ScheduleCache;
use crate::domain::GeoPoint;
use crate::groups::GroupDirectory;
use crate::roster::DriverRoster;

/// Shared application state.
///
/// Contains all the services needed to handle requests. Generic over the
/// timetable provider so handlers can run against mock data.
pub struct AppState<P> {
    /// Day bounds cache in front of the timetable provider
    pub schedules: Arc<ScheduleCache<P>>,

    /// Group name lookup
    pub groups: GroupDirectory,

    /// Registered drivers
    pub roster: DriverRoster,

    /// Point every trip leads to
    pub anchor: GeoPoint,
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(
        schedules: ScheduleCache<P>,
        groups: GroupDirectory,
        roster: DriverRoster,
        anchor: GeoPoint,
    ) -> Self {
        Self {
            schedules: Arc::new(schedules),
            groups,
            roster,
            anchor,
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            schedules: Arc::clone(&self.schedules),
            groups: self.groups.clone(),
            roster: self.roster.clone(),
            anchor: self.anchor,
        }
    }
}
