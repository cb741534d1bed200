use chrono::{DateTime, NaiveDate, Utc};
use eyre::eyre;
use serde::{Deserialize, Serialize};
use slotbook_core::models::{
    availability::AvailabilityWindow,
    booking::{BookedInterval, Booking},
    event_type::EventType,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEventType {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub requires_confirmation: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityWindow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub event_type_id: Uuid,
    pub owner_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub attendee_name: String,
    pub attendee_email: String,
    pub notes: Option<String>,
    pub timezone: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Values of a booking row before the database assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub event_type_id: Uuid,
    pub owner_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub attendee_name: String,
    pub attendee_email: String,
    pub notes: Option<String>,
    pub timezone: String,
    pub status: String,
}

impl From<DbEventType> for EventType {
    fn from(row: DbEventType) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            duration_minutes: row.duration_minutes,
            price_cents: row.price_cents,
            requires_confirmation: row.requires_confirmation,
            created_at: row.created_at,
        }
    }
}

impl From<DbAvailabilityWindow> for AvailabilityWindow {
    fn from(row: DbAvailabilityWindow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            day_of_week: row.day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

impl DbBooking {
    pub fn interval(&self) -> BookedInterval {
        BookedInterval {
            date: self.booking_date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            timezone: Some(self.timezone.clone()),
        }
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = eyre::Report;

    fn try_from(row: DbBooking) -> eyre::Result<Self> {
        let status = row
            .status
            .parse()
            .map_err(|_| eyre!("Booking {} has unknown status '{}'", row.id, row.status))?;

        Ok(Self {
            id: row.id,
            event_type_id: row.event_type_id,
            owner_id: row.owner_id,
            booking_date: row.booking_date,
            start_time: row.start_time,
            end_time: row.end_time,
            attendee_name: row.attendee_name,
            attendee_email: row.attendee_email,
            notes: row.notes,
            timezone: row.timezone,
            status,
            created_at: row.created_at,
        })
    }
}
