//! Calendar-date arithmetic observed in an explicit timezone.
//!
//! Every day count goes through the calendar-date projection of both
//! endpoints in one timezone. Elapsed milliseconds divided by a day length
//! drift across DST transitions, so instants are never subtracted directly.

use crate::errors::{Result, TimelineError};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Start of a day count: an instant already resolved, or a stored date string.
#[derive(Debug, Clone, Copy)]
pub enum DayStart<'a> {
    Instant(DateTime<Utc>),
    Date(&'a str),
}

impl From<DateTime<Utc>> for DayStart<'_> {
    fn from(instant: DateTime<Utc>) -> Self {
        DayStart::Instant(instant)
    }
}

impl<'a> From<&'a str> for DayStart<'a> {
    fn from(date: &'a str) -> Self {
        DayStart::Date(date)
    }
}

/// Parses a strict `YYYY-MM-DD` string into local midnight of `tz`.
pub fn parse_calendar_date(value: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let date = parse_naive_date(value)?;
    Ok(local_midnight(date, tz))
}

/// Projects an instant onto the calendar date observed in `tz`.
pub fn format_calendar_date(instant: DateTime<Utc>, tz: Tz) -> String {
    date_key(instant.with_timezone(&tz).date_naive())
}

/// Whole calendar days from `start` to `end` (now when `None`), clamped at 0.
pub fn day_difference<'a>(
    start: impl Into<DayStart<'a>>,
    end: Option<DateTime<Utc>>,
    tz: Tz,
) -> Result<u32> {
    let start = match start.into() {
        DayStart::Instant(instant) => instant,
        DayStart::Date(value) => parse_calendar_date(value, tz)?,
    };
    let end = end.unwrap_or_else(Utc::now);

    let start_day = start.with_timezone(&tz).date_naive();
    let end_day = end.with_timezone(&tz).date_naive();
    Ok(days_between(start_day, end_day))
}

pub fn days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Validates the shape and calendar range of a `YYYY-MM-DD` string.
pub fn parse_naive_date(value: &str) -> Result<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(TimelineError::invalid_date(value, "expected YYYY-MM-DD"));
    }

    let year = digits(value, 0..4)
        .ok_or_else(|| TimelineError::invalid_date(value, "year is not numeric"))?;
    let month = digits(value, 5..7)
        .ok_or_else(|| TimelineError::invalid_date(value, "month is not numeric"))?;
    let day = digits(value, 8..10)
        .ok_or_else(|| TimelineError::invalid_date(value, "day is not numeric"))?;

    if !(1..=12).contains(&month) {
        return Err(TimelineError::invalid_date(value, "month out of range"));
    }
    let year = year as i32;
    if day == 0 || day > days_in_month(year, month) {
        return Err(TimelineError::invalid_date(value, "day out of range"));
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TimelineError::invalid_date(value, "date out of range"))
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Number of days in a month, `month` in 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Gregorian rule: every fourth year, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn digits(value: &str, range: std::ops::Range<usize>) -> Option<u32> {
    let part = value.get(range)?;
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// First instant of `date` in `tz`. Zones that skip midnight for DST start
/// the day at the first local time that exists.
fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=24 * 4)
        .find_map(|step| {
            tz.from_local_datetime(&(midnight + Duration::minutes(15 * step)))
                .earliest()
        })
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use chrono_tz::{America, Asia, Europe, UTC};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap()
    }

    #[test]
    fn parse_is_local_midnight() {
        let instant = parse_calendar_date("2024-01-15", America::New_York).unwrap();
        assert_eq!(instant, utc(2024, 1, 15, 5, 0));

        let instant = parse_calendar_date("2024-07-15", America::New_York).unwrap();
        assert_eq!(instant, utc(2024, 7, 15, 4, 0));

        let instant = parse_calendar_date("2024-01-15", Asia::Tokyo).unwrap();
        assert_eq!(instant, utc(2024, 1, 14, 15, 0));
    }

    #[test]
    fn parse_rejects_out_of_range_values() {
        for bad in ["2024-13-01", "2024-01-32", "2023-02-29", "2024-00-10", "2024-04-31"] {
            let err = parse_calendar_date(bad, UTC).unwrap_err();
            assert!(
                matches!(err, TimelineError::InvalidDateFormat { .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_malformed_strings() {
        for bad in ["2024-1-01", "2024/01/01", "24-01-01", "2024-01-01T00:00", "", "abcd-ef-gh", "+024-01-01"] {
            assert!(parse_calendar_date(bad, UTC).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn leap_years_follow_gregorian_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));

        assert!(parse_calendar_date("2024-02-29", UTC).is_ok());
        assert!(parse_calendar_date("2000-02-29", UTC).is_ok());
        assert!(parse_calendar_date("1900-02-29", UTC).is_err());
    }

    #[test]
    fn format_projects_into_timezone() {
        let instant = utc(2024, 1, 1, 3, 0);
        assert_eq!(format_calendar_date(instant, UTC), "2024-01-01");
        assert_eq!(format_calendar_date(instant, America::Los_Angeles), "2023-12-31");
        assert_eq!(format_calendar_date(instant, Asia::Tokyo), "2024-01-01");
    }

    #[test]
    fn parse_then_format_round_trips_through_a_year() {
        let zones = [UTC, America::New_York, Europe::Berlin, Asia::Tokyo, America::Sao_Paulo];
        for tz in zones {
            let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            while date.year() == 2024 {
                let key = date_key(date);
                let instant = parse_calendar_date(&key, tz).unwrap();
                assert_eq!(format_calendar_date(instant, tz), key, "{tz}");
                date = date.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn midnight_skipped_by_dst_starts_at_first_valid_time() {
        // Sao Paulo moved clocks from 00:00 to 01:00 on 2018-11-04.
        let instant = parse_calendar_date("2018-11-04", America::Sao_Paulo).unwrap();
        assert_eq!(instant, utc(2018, 11, 4, 3, 0));
        assert_eq!(format_calendar_date(instant, America::Sao_Paulo), "2018-11-04");
    }

    #[test]
    fn difference_counts_calendar_days_across_dst() {
        let start = parse_calendar_date("2024-03-09", America::New_York).unwrap();
        let end = parse_calendar_date("2024-03-11", America::New_York).unwrap();
        // 47 elapsed hours, two calendar days.
        assert_eq!((end - start).num_hours(), 47);
        assert_eq!(day_difference(start, Some(end), America::New_York).unwrap(), 2);
    }

    #[test]
    fn difference_depends_on_observing_timezone() {
        let end = utc(2024, 1, 2, 3, 0);
        assert_eq!(day_difference("2024-01-01", Some(end), UTC).unwrap(), 1);
        assert_eq!(day_difference("2024-01-01", Some(end), America::Los_Angeles).unwrap(), 0);
    }

    #[test]
    fn same_day_instants_are_zero_apart() {
        let morning = utc(2024, 5, 1, 0, 1);
        let night = utc(2024, 5, 1, 23, 59);
        assert_eq!(day_difference(morning, Some(night), UTC).unwrap(), 0);
    }

    #[test]
    fn difference_is_monotonic_and_clamped() {
        let start = parse_calendar_date("2024-06-10", Europe::Berlin).unwrap();
        let mut previous = 0;
        for hours in (-72..=24 * 30).step_by(7) {
            let end = start + Duration::hours(hours);
            let days = day_difference(start, Some(end), Europe::Berlin).unwrap();
            assert!(days >= previous);
            if hours < 0 {
                assert_eq!(days, 0);
            }
            previous = days;
        }
    }

    #[test]
    fn difference_propagates_parse_failure() {
        let err = day_difference("2023-02-29", Some(utc(2024, 1, 1, 0, 0)), UTC).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidDateFormat { .. }));
    }

    #[test]
    fn difference_defaults_end_to_now() {
        let today = format_calendar_date(Utc::now(), UTC);
        assert_eq!(day_difference(today.as_str(), None, UTC).unwrap(), 0);
    }
}
