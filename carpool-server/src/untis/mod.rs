//! Timetable provider client.
//!
//! This module provides an HTTP client for the public weekly timetable API
//! that supplies group listings and raw lesson periods.
//!
//! Key characteristics of the provider:
//! - Weekly data is requested per group and keyed by the week's Monday
//! - Dates are `YYYYMMDD` integers, times are `HHMM` integers with the
//!   leading zero dropped (`750` is 07:50)
//! - A lesson may be split into several periods that arrive in any order

mod client;
mod convert;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{UntisClient, UntisConfig};
pub use convert::{convert_groups, convert_week, parse_untis_date, parse_untis_time, week_start};
pub use error::UntisError;
pub use mock::MockUntisClient;
pub use provider::TimetableProvider;
pub use types::{
    ElementDto, ElementRefDto, GroupDto, GroupsData, GroupsResponse, PeriodDto, WeeklyData,
    WeeklyResponse, WeeklyResult, WeeklyResultData,
};
