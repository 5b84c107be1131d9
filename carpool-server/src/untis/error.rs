//! Timetable provider error types.

use crate::domain::GroupId;

/// Errors from talking to the timetable provider or decoding its payloads.
#[derive(Debug, thiserror::Error)]
pub enum UntisError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider refused our school cookie or user agent
    #[error("unauthorized: check UNTIS_SCHOOL")]
    Unauthorized,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The weekly payload has no period list for the requested group
    #[error("no period list for group {0} in weekly data")]
    MissingGroup(GroupId),

    /// A period date was not a valid YYYYMMDD integer
    #[error("invalid period date: {0}")]
    InvalidDate(u32),

    /// A period time was not a valid HHMM integer
    #[error("invalid period time: {0}")]
    InvalidTime(u32),

    /// Mock data could not be loaded or has no entry for the request
    #[error("mock data: {0}")]
    Mock(String),
}
