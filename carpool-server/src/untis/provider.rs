//! Provider abstraction shared by the live and mock clients.

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{Group, GroupId, WeekTimetable};

use super::error::UntisError;

/// Source of group listings and weekly timetables.
///
/// This abstraction allows the cache and the web layer to be tested
/// with mock data.
pub trait TimetableProvider: Send + Sync {
    /// List every group the provider knows.
    fn fetch_groups(&self) -> impl Future<Output = Result<Vec<Group>, UntisError>> + Send;

    /// Fetch the raw week starting on `week_start` (a Monday) for `group`.
    fn fetch_week(
        &self,
        group: GroupId,
        week_start: NaiveDate,
    ) -> impl Future<Output = Result<WeekTimetable, UntisError>> + Send;
}
