//! Lesson reconstruction from raw timetable periods.
//!
//! The provider splits a lesson into several periods at arbitrary
//! boundaries and delivers them in no particular order. Reconstruction
//! joins periods whose boundary times meet on the same day, then sorts the
//! result by day and start time. Callers rely on that order to read a day's
//! first start and last end without rescanning.

use chrono::NaiveDate;

use crate::domain::{DayBounds, ElementKind, ElementNames, Lesson, Period, WeekTimetable};

/// Errors during reconstruction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimetableError {
    /// A period names an element missing from the element table
    #[error("period references unknown element {id} ({kind:?})")]
    UnknownElement { kind: ElementKind, id: i64 },
}

/// Rebuild merged lessons from one week of periods.
///
/// The set of `(date, start, end)` triples produced does not depend on the
/// order of `periods`.
pub fn reconstruct(periods: &[Period], names: &ElementNames) -> Result<Vec<Lesson>, TimetableError> {
    let mut lessons: Vec<Lesson> = Vec::new();

    for period in periods {
        let (label, location) = resolve_names(period, names)?;
        merge_or_push(&mut lessons, period, label, location);
    }

    lessons.sort_by_key(|l| (l.date, l.start));
    Ok(lessons)
}

/// Lessons on `day`, keeping their order.
pub fn lessons_on(lessons: &[Lesson], day: NaiveDate) -> Vec<Lesson> {
    lessons.iter().filter(|l| l.date == day).cloned().collect()
}

/// First start and last end of a single day's sorted lessons.
///
/// Returns `None` for an empty day.
pub fn bounds_of(day_lessons: &[Lesson]) -> Option<DayBounds> {
    let first = day_lessons.first()?;
    let last = day_lessons.last()?;
    Some(DayBounds {
        start: first.start,
        end: last.end,
    })
}

/// Reconstruct `week` and return the bounds of `day`, if it has lessons.
pub fn day_bounds(week: &WeekTimetable, day: NaiveDate) -> Result<Option<DayBounds>, TimetableError> {
    let lessons = reconstruct(&week.periods, &week.names)?;
    Ok(bounds_of(&lessons_on(&lessons, day)))
}

/// Resolve the first label and first location a period references.
fn resolve_names(
    period: &Period,
    names: &ElementNames,
) -> Result<(Option<String>, Option<String>), TimetableError> {
    let mut label = None;
    let mut location = None;

    for element in &period.elements {
        let slot = match element.kind {
            ElementKind::Label => &mut label,
            ElementKind::Location => &mut location,
            ElementKind::Group | ElementKind::Other(_) => continue,
        };
        if slot.is_some() {
            continue;
        }

        let name = names
            .get(element.kind, element.id)
            .ok_or(TimetableError::UnknownElement {
                kind: element.kind,
                id: element.id,
            })?;
        *slot = Some(name.to_string());

        if label.is_some() && location.is_some() {
            break;
        }
    }

    Ok((label, location))
}

/// Join `period` onto a same-day lesson it touches, or start a new lesson.
fn merge_or_push(
    lessons: &mut Vec<Lesson>,
    period: &Period,
    label: Option<String>,
    location: Option<String>,
) {
    let touching = lessons.iter().position(|l| {
        l.date == period.date && (l.end == period.start || l.start == period.end)
    });

    let Some(idx) = touching else {
        lessons.push(Lesson {
            date: period.date,
            start: period.start,
            end: period.end,
            label,
            location,
        });
        return;
    };

    let lesson = &mut lessons[idx];
    if lesson.end == period.start {
        lesson.end = period.end;
    } else {
        lesson.start = period.start;
    }

    coalesce(lessons, idx);
}

/// Fold the lesson at `idx` together with a same-day lesson it now touches.
///
/// Only the boundary that just moved can touch a neighbour, so at most one
/// fold is needed. The earlier-created lesson keeps its names.
fn coalesce(lessons: &mut Vec<Lesson>, idx: usize) {
    let (date, start, end) = {
        let grown = &lessons[idx];
        (grown.date, grown.start, grown.end)
    };

    let neighbour = lessons
        .iter()
        .enumerate()
        .find(|(j, l)| *j != idx && l.date == date && (l.start == end || l.end == start))
        .map(|(j, _)| j);

    let Some(other) = neighbour else {
        return;
    };

    let (keep, drop) = if idx < other { (idx, other) } else { (other, idx) };
    let removed = lessons.remove(drop);
    let kept = &mut lessons[keep];
    kept.start = kept.start.min(removed.start);
    kept.end = kept.end.max(removed.end);
    if kept.label.is_none() {
        kept.label = removed.label;
    }
    if kept.location.is_none() {
        kept.location = removed.location;
    }
}
