//! Parsing helpers for the wall-clock values that travel through the API as
//! strings: `HH:MM` times, `YYYY-MM-DD` dates and IANA timezone names.

use chrono::{Datelike, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::errors::{BookingError, BookingResult};

/// Parses a strict `HH:MM` 24-hour clock time.
///
/// Single-digit hours (`9:00`) and seconds (`09:00:00`) are rejected so that
/// stored values stay in one canonical form.
pub fn parse_clock_time(value: &str) -> BookingResult<NaiveTime> {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(BookingError::Validation(format!(
            "Invalid time '{}'. Expected HH:MM",
            value
        )));
    }

    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        BookingError::Validation(format!("Invalid time '{}'. Expected HH:MM", value))
    })
}

/// Earliest year accepted in requests.
pub const MIN_YEAR: i32 = 1900;
/// Latest year accepted in requests.
pub const MAX_YEAR: i32 = 9999;

/// Parses an ISO `YYYY-MM-DD` calendar date with a year in
/// `MIN_YEAR..=MAX_YEAR`.
pub fn parse_date(value: &str) -> BookingResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        BookingError::Validation(format!("Invalid date '{}'. Expected YYYY-MM-DD", value))
    })?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(BookingError::Validation(format!(
            "Date '{}' is outside the years {} to {}",
            value, MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(date)
}

/// Resolves an IANA timezone name such as `Europe/Zurich`.
pub fn parse_timezone(value: &str) -> BookingResult<Tz> {
    value
        .parse::<Tz>()
        .map_err(|e| BookingError::Validation(format!("Unknown timezone '{}': {}", value, e)))
}

/// Day index used by availability windows: 0 = Sunday through 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Checks that `start` and `end` are valid `HH:MM` values with `start < end`.
pub fn validate_time_range(start: &str, end: &str) -> BookingResult<(NaiveTime, NaiveTime)> {
    let open = parse_clock_time(start)?;
    let close = parse_clock_time(end)?;
    if open >= close {
        return Err(BookingError::Validation(format!(
            "Start time {} must be before end time {}",
            start, end
        )));
    }
    Ok((open, close))
}
