//! Timetable provider response DTOs.
//!
//! These mirror the public weekly timetable JSON. Fields we don't use are
//! left out and ignored on deserialization; fields we do use are required,
//! so a payload missing them fails loudly.

use std::collections::HashMap;

use serde::Deserialize;

/// Response from the `pageconfig` endpoint, listing every group.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupsResponse {
    pub data: GroupsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupsData {
    pub elements: Vec<GroupDto>,
}

/// One group entry.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupDto {
    pub id: i64,
    pub name: String,
}

/// Response from the weekly `data` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyResponse {
    pub data: WeeklyData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyData {
    pub result: WeeklyResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyResult {
    pub data: WeeklyResultData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyResultData {
    /// Period lists keyed by the stringified element id.
    pub element_periods: HashMap<String, Vec<PeriodDto>>,

    /// Element table the periods refer into.
    pub elements: Vec<ElementDto>,
}

/// One period fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDto {
    /// Date as a YYYYMMDD integer.
    pub date: u32,

    /// Start time as an HHMM integer without leading zeros (e.g. 750).
    pub start_time: u32,

    /// End time, same encoding as `start_time`.
    pub end_time: u32,

    pub elements: Vec<ElementRefDto>,
}

/// Reference from a period to the element table.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementRefDto {
    #[serde(rename = "type")]
    pub kind: i64,
    pub id: i64,
}

/// Entry in the element table.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementDto {
    #[serde(rename = "type")]
    pub kind: i64,
    pub id: i64,
    pub name: String,
}
