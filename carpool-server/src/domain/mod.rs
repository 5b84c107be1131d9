//! Domain types for the carpool server.
//!
//! This module contains the core value types shared by the timetable,
//! cache, reachability and matching code. Types that carry constraints
//! enforce them at construction time.

mod driver;
mod error;
mod geo;
mod group;
mod lesson;
mod zone;

pub use driver::{DriverProfile, DriverUpdate};
pub use error::DomainError;
pub use geo::GeoPoint;
pub use group::{Group, GroupId};
pub use lesson::{
    DayBounds, ElementKind, ElementNames, ElementRef, Lesson, Period, WeekTimetable,
};
pub use zone::{MAX_ZONE_PCT, ReachabilityZone};
