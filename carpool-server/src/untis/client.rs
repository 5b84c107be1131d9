//! Timetable provider HTTP client.
//!
//! Talks to the public (anonymous) weekly timetable endpoints. The school is
//! selected with a cookie rather than a path segment.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Group, GroupId, WeekTimetable};

use super::convert::{convert_groups, convert_week};
use super::error::UntisError;
use super::provider::TimetableProvider;
use super::types::{GroupsResponse, WeeklyResponse};

/// Default provider host.
const DEFAULT_BASE_URL: &str = "https://hepta.webuntis.com";

/// Path shared by both weekly endpoints.
const WEEKLY_PATH: &str = "WebUntis/api/public/timetable/weekly";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Element type for groups in request parameters.
const GROUP_ELEMENT_TYPE: &str = "1";

/// Configuration for the timetable client.
#[derive(Debug, Clone)]
pub struct UntisConfig {
    /// School identifier sent in the `schoolname` cookie
    pub school: String,
    /// Base URL of the provider
    pub base_url: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Output format requested from the provider
    pub format_id: u32,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl UntisConfig {
    /// Create a new config for the given school.
    pub fn new(school: impl Into<String>) -> Self {
        Self {
            school: school.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("carpool-server/{}", env!("CARGO_PKG_VERSION")),
            format_id: 4,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the requested format id.
    pub fn with_format_id(mut self, format_id: u32) -> Self {
        self.format_id = format_id;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Timetable provider API client.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct UntisClient {
    http: reqwest::Client,
    base_url: String,
    format_id: u32,
    semaphore: Arc<Semaphore>,
}

impl UntisClient {
    /// Create a new client with the given configuration.
    pub fn new(config: UntisConfig) -> Result<Self, UntisError> {
        let mut headers = HeaderMap::new();

        let cookie = HeaderValue::from_str(&format!("schoolname=\"{}\"", config.school))
            .map_err(|_| UntisError::Api {
                status: 0,
                message: "Invalid school name format".to_string(),
            })?;
        headers.insert(COOKIE, cookie);

        let agent = HeaderValue::from_str(&config.user_agent).map_err(|_| UntisError::Api {
            status: 0,
            message: "Invalid user agent format".to_string(),
        })?;
        headers.insert(USER_AGENT, agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            format_id: config.format_id,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// GET `url` with `query` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, UntisError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| UntisError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(UntisError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UntisError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| UntisError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}/{}", self.base_url, WEEKLY_PATH, endpoint)
    }
}

impl TimetableProvider for UntisClient {
    async fn fetch_groups(&self) -> Result<Vec<Group>, UntisError> {
        let today = Local::now().date_naive();
        let response: GroupsResponse = self
            .get_json(
                &self.url("pageconfig"),
                &[
                    ("type", GROUP_ELEMENT_TYPE.to_string()),
                    ("date", today.format("%Y-%m-%d").to_string()),
                    ("formatId", self.format_id.to_string()),
                    ("isMyTimetableSelected", "false".to_string()),
                ],
            )
            .await?;

        Ok(convert_groups(&response))
    }

    async fn fetch_week(
        &self,
        group: GroupId,
        week_start: NaiveDate,
    ) -> Result<WeekTimetable, UntisError> {
        debug!(%group, %week_start, "fetching weekly timetable");

        let response: WeeklyResponse = self
            .get_json(
                &self.url("data"),
                &[
                    ("elementType", GROUP_ELEMENT_TYPE.to_string()),
                    ("elementId", group.to_string()),
                    ("date", week_start.format("%Y-%m-%d").to_string()),
                    ("formatId", self.format_id.to_string()),
                ],
            )
            .await?;

        convert_week(&response, group)
    }
}
