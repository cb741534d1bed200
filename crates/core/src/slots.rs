//! # Slot Generation
//!
//! Turns an owner's weekly availability windows into the bookable slots of
//! a single day.
//!
//! ## Algorithm
//!
//! 1. Reject a non-positive or oversized duration.
//! 2. Return nothing for a date that is already over in the request timezone.
//! 3. Keep the windows whose weekday matches the date and parse their times.
//! 4. For each window, walk candidate starts in 15 minute steps from the
//!    window start, stopping once a candidate would end after the window end.
//! 5. Convert wall-clock candidates to UTC (starts inside a DST gap are
//!    dropped).
//! 6. Flag every candidate that overlaps a booked interval (half-open
//!    overlap, touching endpoints are fine). Bookings are resolved to UTC in
//!    the timezone they were made in, so the comparison holds across
//!    timezones. Only bookings dated within a day of the requested date can
//!    reach it; the rest are ignored.
//! 7. Drop candidates that start at or before `now` when the date is today,
//!    and sort by start.
//!
//! Windows are expanded independently, so two overlapping windows yield
//! duplicate candidates; each window is authoritative for its own range.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::errors::{BookingError, BookingResult};
use crate::models::availability::AvailabilityWindow;
use crate::models::booking::BookedInterval;
use crate::models::event_type::validate_duration;
use crate::models::slot::{SlotMode, TimeSlot};
use crate::time::{day_of_week, parse_clock_time, parse_timezone, validate_time_range};

/// Distance between two consecutive candidate starts, whatever the duration.
pub const SLOT_STEP_MINUTES: i64 = 15;

/// Everything the generator needs for one day.
#[derive(Debug, Clone)]
pub struct SlotRequest<'a> {
    pub date: NaiveDate,
    pub windows: &'a [AvailabilityWindow],
    pub bookings: &'a [BookedInterval],
    pub duration_minutes: i32,
    pub mode: SlotMode,
    /// Timezone the `HH:MM` values of windows are read in, and of bookings
    /// that carry no timezone of their own
    pub timezone: Tz,
    pub now: DateTime<Utc>,
}

/// Generates the ordered slots for `request.date`.
///
/// # Errors
///
/// * `BookingError::Validation` - a matching window or a nearby booking
///   carries a malformed `HH:MM` value or timezone, a window does not start
///   before it ends, or the duration is out of range
pub fn generate_slots(request: &SlotRequest<'_>) -> BookingResult<Vec<TimeSlot>> {
    validate_duration(request.duration_minutes)?;

    let today = request.now.with_timezone(&request.timezone).date_naive();
    if request.date < today {
        debug!("Requested date {} is before {}, no slots", request.date, today);
        return Ok(Vec::new());
    }

    let weekday = day_of_week(request.date);
    let ranges = request
        .windows
        .iter()
        .filter(|window| window.day_of_week == weekday)
        .map(|window| validate_time_range(&window.start_time, &window.end_time))
        .collect::<BookingResult<Vec<_>>>()?;

    if ranges.is_empty() {
        return Ok(Vec::new());
    }

    let booked = booked_ranges(request.date, request.bookings, &request.timezone)?;
    let length = Duration::minutes(i64::from(request.duration_minutes));
    let step = Duration::minutes(SLOT_STEP_MINUTES);
    let is_today = request.date == today;

    let mut slots = Vec::new();
    for (open, close) in ranges {
        let close = request.date.and_time(close);
        let mut start = request.date.and_time(open);

        // Checked: the last representable date has no room past its end
        while let Some(end) = start.checked_add_signed(length) {
            if end > close {
                break;
            }

            if let Some(slot) = to_slot(&request.timezone, start, length) {
                let available = !booked.iter().any(|(booked_start, booked_end)| {
                    slot.start < *booked_end && slot.end > *booked_start
                });

                if (available || request.mode == SlotMode::All)
                    && (!is_today || slot.start > request.now)
                {
                    slots.push(TimeSlot { available, ..slot });
                }
            }

            match start.checked_add_signed(step) {
                Some(next) => start = next,
                None => break,
            }
        }
    }

    slots.sort_by_key(|slot| slot.start);

    debug!(
        "Generated {} slots for {} ({:?}, {} min)",
        slots.len(),
        request.date,
        request.mode,
        request.duration_minutes
    );
    Ok(slots)
}

/// Resolves a wall-clock time on `date` to an absolute instant.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times in a
/// DST gap do not exist and yield `None`.
pub fn local_to_utc(tz: &Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

// `end` is measured in absolute time, so a DST jump inside the slot does not
// change its length.
fn to_slot(tz: &Tz, start: NaiveDateTime, length: Duration) -> Option<TimeSlot> {
    let start = local_to_utc(tz, start.date(), start.time())?;
    Some(TimeSlot {
        start,
        end: start.checked_add_signed(length)?,
        available: true,
    })
}

fn booked_ranges(
    date: NaiveDate,
    bookings: &[BookedInterval],
    default_tz: &Tz,
) -> BookingResult<Vec<(DateTime<Utc>, DateTime<Utc>)>> {
    bookings
        .iter()
        .filter(|booking| booking.date.signed_duration_since(date).num_days().abs() <= 1)
        .map(|booking| {
            let tz = match booking.timezone.as_deref() {
                Some(name) => parse_timezone(name)?,
                None => *default_tz,
            };
            let start_time = parse_clock_time(&booking.start_time)?;
            let end_time = parse_clock_time(&booking.end_time)?;

            let start = local_to_utc(&tz, booking.date, start_time).ok_or_else(|| {
                BookingError::Validation(format!(
                    "Booking at {} {} does not exist in {}",
                    booking.date, booking.start_time, tz
                ))
            })?;
            // An inverted booking blocks nothing
            let end = start
                .checked_add_signed(end_time - start_time)
                .unwrap_or(start);

            Ok((start, end))
        })
        .collect()
}
