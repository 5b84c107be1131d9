//! Conversion from provider DTOs to domain types.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};

use crate::domain::{
    ElementKind, ElementNames, ElementRef, Group, GroupId, Period, WeekTimetable,
};

use super::error::UntisError;
use super::types::{GroupsResponse, PeriodDto, WeeklyResponse};

/// Convert the group listing.
pub fn convert_groups(response: &GroupsResponse) -> Vec<Group> {
    response
        .data
        .elements
        .iter()
        .map(|g| Group::new(g.id, g.name.clone()))
        .collect()
}

/// Convert one week of weekly data for `group`.
///
/// Fails if the payload has no period list for the group or any period
/// carries an invalid date or time. No partial result is returned.
pub fn convert_week(response: &WeeklyResponse, group: GroupId) -> Result<WeekTimetable, UntisError> {
    let data = &response.data.result.data;

    let periods = data
        .element_periods
        .get(&group.to_string())
        .ok_or(UntisError::MissingGroup(group))?
        .iter()
        .map(convert_period)
        .collect::<Result<Vec<_>, _>>()?;

    let mut names = ElementNames::new();
    for element in &data.elements {
        names.insert(ElementKind::from_code(element.kind), element.id, element.name.clone());
    }

    Ok(WeekTimetable { periods, names })
}

fn convert_period(dto: &PeriodDto) -> Result<Period, UntisError> {
    Ok(Period {
        date: parse_untis_date(dto.date)?,
        start: parse_untis_time(dto.start_time)?,
        end: parse_untis_time(dto.end_time)?,
        elements: dto
            .elements
            .iter()
            .map(|e| ElementRef::new(e.id, ElementKind::from_code(e.kind)))
            .collect(),
    })
}

/// Parse a `YYYYMMDD` integer.
pub fn parse_untis_date(value: u32) -> Result<NaiveDate, UntisError> {
    let year = (value / 10_000) as i32;
    let month = (value / 100) % 100;
    let day = value % 100;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(UntisError::InvalidDate(value))
}

/// Parse an `HHMM` integer; leading zeros are dropped upstream, so 750 is 07:50.
pub fn parse_untis_time(value: u32) -> Result<NaiveTime, UntisError> {
    if value > 2359 {
        return Err(UntisError::InvalidTime(value));
    }
    NaiveTime::from_hms_opt(value / 100, value % 100, 0).ok_or(UntisError::InvalidTime(value))
}

/// Monday of the week containing `date`; weekly requests are keyed by it.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parse_dates() {
        assert_eq!(parse_untis_date(20240212).unwrap(), date(2024, 2, 12));
        assert!(parse_untis_date(20241301).is_err());
        assert!(parse_untis_date(20240230).is_err());
        assert!(parse_untis_date(0).is_err());
    }

    #[test]
    fn parse_times_zero_padded() {
        assert_eq!(parse_untis_time(750).unwrap(), hm(7, 50));
        assert_eq!(parse_untis_time(1305).unwrap(), hm(13, 5));
        assert_eq!(parse_untis_time(5).unwrap(), hm(0, 5));
        assert_eq!(parse_untis_time(0).unwrap(), hm(0, 0));
        assert!(parse_untis_time(1260).is_err());
        assert!(parse_untis_time(2400).is_err());
        assert!(parse_untis_time(12345).is_err());
    }

    #[test]
    fn week_start_is_monday() {
        // 2024-02-12 is a Monday
        assert_eq!(week_start(date(2024, 2, 12)), date(2024, 2, 12));
        assert_eq!(week_start(date(2024, 2, 15)), date(2024, 2, 12));
        assert_eq!(week_start(date(2024, 2, 18)), date(2024, 2, 12));
        // Across a month boundary
        assert_eq!(week_start(date(2024, 3, 1)), date(2024, 2, 26));
    }

    fn weekly(value: serde_json::Value) -> WeeklyResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn converts_week() {
        let response = weekly(json!({"data": {"result": {"data": {
            "elementPeriods": {"12": [
                {"date": 20240212, "startTime": 750, "endTime": 835,
                 "elements": [{"type": 1, "id": 12}, {"type": 3, "id": 5}, {"type": 4, "id": 9}]}
            ]},
            "elements": [
                {"type": 1, "id": 12, "name": "10a"},
                {"type": 3, "id": 5, "name": "MA"},
                {"type": 4, "id": 9, "name": "R101"}
            ]
        }}}}));

        let week = convert_week(&response, GroupId(12)).unwrap();
        assert_eq!(week.periods.len(), 1);
        let period = &week.periods[0];
        assert_eq!(period.date, date(2024, 2, 12));
        assert_eq!(period.start, hm(7, 50));
        assert_eq!(period.end, hm(8, 35));
        assert_eq!(period.elements[1], ElementRef::new(5, ElementKind::Label));
        assert_eq!(week.names.get(ElementKind::Location, 9), Some("R101"));
    }

    #[test]
    fn missing_group_is_fatal() {
        let response = weekly(json!({"data": {"result": {"data": {
            "elementPeriods": {"12": []},
            "elements": []
        }}}}));

        let err = convert_week(&response, GroupId(13)).unwrap_err();
        assert!(matches!(err, UntisError::MissingGroup(GroupId(13))));
    }

    #[test]
    fn bad_time_is_fatal() {
        let response = weekly(json!({"data": {"result": {"data": {
            "elementPeriods": {"12": [
                {"date": 20240212, "startTime": 750, "endTime": 835, "elements": []},
                {"date": 20240212, "startTime": 975, "endTime": 1000, "elements": []}
            ]},
            "elements": []
        }}}}));

        let err = convert_week(&response, GroupId(12)).unwrap_err();
        assert!(matches!(err, UntisError::InvalidTime(975)));
    }

    #[test]
    fn converts_groups() {
        let response: GroupsResponse = serde_json::from_value(json!({
            "data": {"elements": [{"id": 1, "name": "5a"}, {"id": 2, "name": "5b"}]}
        }))
        .unwrap();
        let groups = convert_groups(&response);
        assert_eq!(groups, vec![Group::new(1, "5a"), Group::new(2, "5b")]);
    }
}
