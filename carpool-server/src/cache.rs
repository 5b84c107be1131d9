//! Memoized day bounds per group.
//!
//! Reconstructing a day means fetching and merging the whole week from the
//! provider, so the resulting first-start / last-end pair is cached per
//! `(group, day)`. Days with no lessons are not cached; the next request
//! for such a day asks the provider again.
//!
//! Past days are removed by a periodic sweep. The map is a concurrent
//! cache, so the sweep can run while requests read and populate it.
//!
//! The sweep is not the only way entries leave. The cache is bounded by
//! `CacheConfig::max_capacity`, and once full its admission policy may
//! evict or refuse entries for today or later days too. A missing entry
//! only means the next lookup goes back to the provider; `cached()` is not
//! a record of which days are still current.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use moka::future::Cache as MokaCache;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::{DayBounds, GroupId};
use crate::timetable::{TimetableError, day_bounds};
use crate::untis::{TimetableProvider, UntisError, week_start};

/// Cache key: (group, calendar day).
type DayKey = (GroupId, NaiveDate);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached days.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

/// Outcome of a day lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySchedule {
    /// The group has lessons between these bounds.
    Active(DayBounds),
    /// No lessons that day (weekend, holiday, or not published yet).
    NoActivity,
}

impl DaySchedule {
    pub fn bounds(&self) -> Option<DayBounds> {
        match self {
            DaySchedule::Active(bounds) => Some(*bounds),
            DaySchedule::NoActivity => None,
        }
    }
}

/// Errors on the cache-miss path.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("timetable fetch failed: {0}")]
    Fetch(#[from] UntisError),

    #[error("timetable data is inconsistent: {0}")]
    Timetable(#[from] TimetableError),
}

/// Day bounds cache in front of a timetable provider.
pub struct ScheduleCache<P> {
    provider: P,
    days: MokaCache<DayKey, DayBounds>,
}

impl<P: TimetableProvider> ScheduleCache<P> {
    /// Create a new cache with the given configuration.
    pub fn new(provider: P, config: &CacheConfig) -> Self {
        let days = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self { provider, days }
    }

    /// Get the bounds of `day` for `group`, fetching the week on a miss.
    ///
    /// Concurrent misses for the same key each fetch and store the same
    /// value.
    pub async fn bounds_for(
        &self,
        group: GroupId,
        day: NaiveDate,
    ) -> Result<DaySchedule, ScheduleError> {
        let key = (group, day);

        if let Some(bounds) = self.days.get(&key).await {
            return Ok(DaySchedule::Active(bounds));
        }

        debug!(%group, %day, "schedule cache miss");
        let week = self.provider.fetch_week(group, week_start(day)).await?;

        match day_bounds(&week, day)? {
            Some(bounds) => {
                self.days.insert(key, bounds).await;
                Ok(DaySchedule::Active(bounds))
            }
            None => {
                debug!(%group, %day, "no lessons, not caching");
                Ok(DaySchedule::NoActivity)
            }
        }
    }

    /// Cached bounds, without touching the provider.
    pub async fn cached(&self, group: GroupId, day: NaiveDate) -> Option<DayBounds> {
        self.days.get(&(group, day)).await
    }

    /// Remove every cached day strictly before `today`.
    ///
    /// Stale keys are collected first and invalidated afterwards. Returns
    /// the number of entries removed.
    pub async fn sweep(&self, today: NaiveDate) -> usize {
        let stale: Vec<DayKey> = self
            .days
            .iter()
            .filter(|(key, _)| key.1 < today)
            .map(|(key, _)| *key)
            .collect();

        for key in &stale {
            self.days.invalidate(key).await;
        }

        stale.len()
    }

    /// Number of cached days (for monitoring).
    pub async fn entry_count(&self) -> u64 {
        self.days.run_pending_tasks().await;
        self.days.entry_count()
    }

    /// Access the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Run `sweep` against the local date every `period`, first one period
/// from now.
///
/// # Panics
///
/// Panics if `period` is zero.
pub fn spawn_sweeper<P: TimetableProvider + 'static>(
    cache: Arc<ScheduleCache<P>>,
    period: Duration,
) -> JoinHandle<()> {
    assert!(!period.is_zero(), "sweep period must be non-zero");

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            let removed = cache.sweep(Local::now().date_naive()).await;
            let remaining = cache.entry_count().await;
            info!(removed, remaining, "swept schedule cache");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::untis::{GroupsResponse, MockUntisClient, WeeklyResponse};
    use chrono::NaiveTime;
    use serde_json::json;
    use std::collections::HashMap;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// Lessons Monday to Thursday (12th-15th), nothing on Friday.
    fn week_payload(group: i64) -> WeeklyResponse {
        let periods: Vec<_> = [20240212, 20240213, 20240214, 20240215]
            .into_iter()
            .flat_map(|date| {
                [
                    json!({"date": date, "startTime": 845, "endTime": 930, "elements": []}),
                    json!({"date": date, "startTime": 800, "endTime": 845, "elements": []}),
                    json!({"date": date, "startTime": 1000, "endTime": 1130, "elements": []}),
                ]
            })
            .collect();

        serde_json::from_value(json!({"data": {"result": {"data": {
            "elementPeriods": {group.to_string(): periods},
            "elements": []
        }}}}))
        .unwrap()
    }

    fn mock(groups: std::ops::RangeInclusive<i64>) -> MockUntisClient {
        let listing: GroupsResponse =
            serde_json::from_value(json!({"data": {"elements": []}})).unwrap();
        let weeks: HashMap<_, _> = groups.map(|g| (GroupId(g), week_payload(g))).collect();
        MockUntisClient::from_parts(listing, weeks)
    }

    fn cache(groups: std::ops::RangeInclusive<i64>) -> ScheduleCache<MockUntisClient> {
        ScheduleCache::new(mock(groups), &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        assert_eq!(CacheConfig::default().max_capacity, 10_000);
    }

    #[tokio::test]
    async fn miss_then_hit() {
        let cache = cache(1..=1);

        let first = cache.bounds_for(GroupId(1), day(13)).await.unwrap();
        assert_eq!(
            first,
            DaySchedule::Active(DayBounds {
                start: time(8, 0),
                end: time(11, 30),
            })
        );
        assert_eq!(cache.provider().week_fetches(), 1);

        let second = cache.bounds_for(GroupId(1), day(13)).await.unwrap();
        assert_eq!(second, first);
        assert_eq!(cache.provider().week_fetches(), 1);
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn empty_day_is_not_cached() {
        let cache = cache(1..=1);

        let friday = cache.bounds_for(GroupId(1), day(16)).await.unwrap();
        assert_eq!(friday, DaySchedule::NoActivity);
        assert_eq!(cache.cached(GroupId(1), day(16)).await, None);
        assert_eq!(cache.entry_count().await, 0);

        // A repeat query goes back to the provider
        let again = cache.bounds_for(GroupId(1), day(16)).await.unwrap();
        assert_eq!(again, DaySchedule::NoActivity);
        assert_eq!(cache.provider().week_fetches(), 2);
    }

    #[tokio::test]
    async fn fetch_errors_propagate_and_cache_nothing() {
        let cache = cache(1..=1);

        let err = cache.bounds_for(GroupId(2), day(13)).await.unwrap_err();
        assert!(matches!(err, ScheduleError::Fetch(UntisError::Mock(_))));
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn sweep_removes_only_past_days() {
        let cache = cache(1..=2);
        for group in [GroupId(1), GroupId(2)] {
            for d in 12..=15 {
                cache.bounds_for(group, day(d)).await.unwrap();
            }
        }
        assert_eq!(cache.entry_count().await, 8);

        let removed = cache.sweep(day(14)).await;
        assert_eq!(removed, 4);

        for group in [GroupId(1), GroupId(2)] {
            assert_eq!(cache.cached(group, day(12)).await, None);
            assert_eq!(cache.cached(group, day(13)).await, None);
            assert!(cache.cached(group, day(14)).await.is_some());
            assert!(cache.cached(group, day(15)).await.is_some());
        }
        assert_eq!(cache.entry_count().await, 4);
    }

    #[tokio::test]
    async fn sweeper_clears_past_days_in_background() {
        let cache = Arc::new(cache(1..=1));
        for d in 12..=13 {
            cache.bounds_for(GroupId(1), day(d)).await.unwrap();
        }
        assert_eq!(cache.entry_count().await, 2);

        let handle = spawn_sweeper(Arc::clone(&cache), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        // February 2024 is long past by the local clock
        assert_eq!(cache.cached(GroupId(1), day(12)).await, None);
        assert_eq!(cache.cached(GroupId(1), day(13)).await, None);
        assert_eq!(cache.entry_count().await, 0);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn sweeper_rejects_zero_period() {
        let _ = spawn_sweeper(Arc::new(cache(1..=1)), Duration::ZERO);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn sweep_alongside_population() {
        let cache = Arc::new(cache(1..=8));
        let today = day(14);

        for d in 12..=15 {
            cache.bounds_for(GroupId(1), day(d)).await.unwrap();
        }

        let mut fillers = Vec::new();
        for g in 2..=8 {
            let cache = Arc::clone(&cache);
            fillers.push(tokio::spawn(async move {
                for d in 12..=15 {
                    cache.bounds_for(GroupId(g), day(d)).await.unwrap();
                }
            }));
        }

        let sweeper = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                for _ in 0..20 {
                    cache.sweep(today).await;
                    tokio::task::yield_now().await;
                }
            })
        };

        for filler in fillers {
            filler.await.unwrap();
        }
        sweeper.await.unwrap();

        // Anything cached for a past day after the concurrent sweeps started
        // goes in one more cycle.
        cache.sweep(today).await;

        for g in 1..=8 {
            for d in 12..=15 {
                let cached = cache.cached(GroupId(g), day(d)).await;
                if day(d) < today {
                    assert_eq!(cached, None, "group {g} day {d} should be swept");
                } else {
                    assert!(cached.is_some(), "group {g} day {d} should survive");
                }
            }
        }
    }
}
