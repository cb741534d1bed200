use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> BookingResult<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(BookingError::Validation(format!(
                "Unknown booking status '{}'",
                other
            ))),
        }
    }
}

/// A reservation that blocks every slot it overlaps in absolute time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    /// Timezone the booking was made in; `None` reads it in the request timezone
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub event_type_id: Uuid,
    pub owner_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub attendee_name: String,
    pub attendee_email: String,
    pub notes: Option<String>,
    /// Timezone the wall-clock times were booked in
    pub timezone: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn interval(&self) -> BookedInterval {
        BookedInterval {
            date: self.booking_date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            timezone: Some(self.timezone.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Event type slug
    pub slug: String,
    /// Day in YYYY-MM-DD format
    pub date: String,
    /// Requested start as HH:MM wall-clock time
    pub start_time: String,
    pub timezone: Option<String>,
    pub attendee_name: String,
    pub attendee_email: String,
    pub notes: Option<String>,
}

impl CreateBookingRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if self.attendee_name.trim().is_empty() {
            return Err(BookingError::Validation(
                "Attendee name cannot be empty".to_string(),
            ));
        }
        let email = self.attendee_email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(BookingError::Validation(format!(
                "Invalid attendee email '{}'",
                self.attendee_email
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub event_type_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListQuery {
    pub owner_id: Uuid,
    /// Optional day filter in YYYY-MM-DD format
    pub date: Option<String>,
}
