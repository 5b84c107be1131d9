//! Mock timetable provider for testing without network access.
//!
//! Loads a group listing and per-group weekly payloads from JSON files and
//! serves them as if they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::domain::{Group, GroupId, WeekTimetable};

use super::convert::{convert_groups, convert_week};
use super::error::UntisError;
use super::provider::TimetableProvider;
use super::types::{GroupsResponse, WeeklyResponse};

/// File holding the group listing inside a mock data directory.
const GROUPS_FILE: &str = "groups.json";

/// Mock provider that serves fixed payloads.
///
/// The requested week is ignored: every request for a group returns the
/// same weekly payload.
#[derive(Clone)]
pub struct MockUntisClient {
    groups: Arc<GroupsResponse>,
    weeks: Arc<HashMap<GroupId, WeeklyResponse>>,
    week_fetches: Arc<AtomicUsize>,
}

impl MockUntisClient {
    /// Build a mock from in-memory payloads.
    pub fn from_parts(groups: GroupsResponse, weeks: HashMap<GroupId, WeeklyResponse>) -> Self {
        Self {
            groups: Arc::new(groups),
            weeks: Arc::new(weeks),
            week_fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load a mock from a directory.
    ///
    /// Expects `groups.json` plus one `{group_id}.json` per group with data
    /// (e.g., `2264.json`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, UntisError> {
        let data_dir = data_dir.as_ref();
        let groups: GroupsResponse = read_json(&data_dir.join(GROUPS_FILE))?;

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            UntisError::Mock(format!("failed to read mock data directory: {e}"))
        })?;

        let mut weeks = HashMap::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| UntisError::Mock(format!("failed to read directory entry: {e}")))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Everything but the listing is named after its group id
            let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<i64>().ok())
            else {
                continue;
            };

            weeks.insert(GroupId(id), read_json(&path)?);
        }

        Ok(Self::from_parts(groups, weeks))
    }

    /// Number of weekly fetches served so far.
    pub fn week_fetches(&self) -> usize {
        self.week_fetches.load(Ordering::SeqCst)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, UntisError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| UntisError::Mock(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&json).map_err(|e| UntisError::Json {
        message: format!("{}: {e}", path.display()),
        body: None,
    })
}

impl TimetableProvider for MockUntisClient {
    async fn fetch_groups(&self) -> Result<Vec<Group>, UntisError> {
        Ok(convert_groups(&self.groups))
    }

    async fn fetch_week(
        &self,
        group: GroupId,
        _week_start: NaiveDate,
    ) -> Result<WeekTimetable, UntisError> {
        self.week_fetches.fetch_add(1, Ordering::SeqCst);

        let response = self
            .weeks
            .get(&group)
            .ok_or_else(|| UntisError::Mock(format!("no weekly data for group {group}")))?;

        convert_week(response, group)
    }
}
