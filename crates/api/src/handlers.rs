pub mod availability;
pub mod bookings;
pub mod event_types;

use chrono_tz::Tz;
use slotbook_core::{errors::BookingResult, time::parse_timezone};

/// Uses the requested timezone when given, the configured default otherwise.
pub fn resolve_timezone(requested: Option<&str>, default: Tz) -> BookingResult<Tz> {
    match requested.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => parse_timezone(name),
        None => Ok(default),
    }
}
