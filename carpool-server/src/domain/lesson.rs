//! Timetable fragments and reconstructed lessons.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

/// Kind of element a period references.
///
/// The provider encodes these as small integers. Kinds we don't care
/// about (teachers, for instance) are carried as `Other` and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Group,
    Label,
    Location,
    Other(i64),
}

impl ElementKind {
    /// Map the provider's numeric element type.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ElementKind::Group,
            3 => ElementKind::Label,
            4 => ElementKind::Location,
            other => ElementKind::Other(other),
        }
    }
}

/// A reference from a period to an entry in the element table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef {
    pub id: i64,
    pub kind: ElementKind,
}

impl ElementRef {
    pub fn new(id: i64, kind: ElementKind) -> Self {
        Self { id, kind }
    }
}

/// One raw scheduled time range as delivered upstream.
///
/// A single lesson may be split across several periods, and periods
/// for the same day arrive in no particular order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// References in the order the provider listed them.
    pub elements: Vec<ElementRef>,
}

/// A merged, contiguous block of scheduled activity on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Subject or other display label.
    pub label: Option<String>,
    /// Room or other location label.
    pub location: Option<String>,
}

/// Display names from the element table, keyed by `(kind, id)`.
#[derive(Debug, Clone, Default)]
pub struct ElementNames {
    names: HashMap<(ElementKind, i64), String>,
}

impl ElementNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ElementKind, id: i64, name: impl Into<String>) {
        self.names.insert((kind, id), name.into());
    }

    pub fn get(&self, kind: ElementKind, id: i64) -> Option<&str> {
        self.names.get(&(kind, id)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One week of raw periods for a group, plus the names they reference.
#[derive(Debug, Clone, Default)]
pub struct WeekTimetable {
    pub periods: Vec<Period>,
    pub names: ElementNames,
}

/// First start and last end of a day's activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DayBounds {
    /// Start time as `HH:MM`.
    pub fn start_hhmm(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    /// End time as `HH:MM`.
    pub fn end_hhmm(&self) -> String {
        self.end.format("%H:%M").to_string()
    }
}
