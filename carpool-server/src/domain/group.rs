//! Group identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric group identifier assigned by the timetable provider.
///
/// Only meaningful to the provider that issued it; the service never
/// invents ids of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A class, course or team as listed by the timetable provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

impl Group {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: GroupId(id),
            name: name.into(),
        }
    }
}
