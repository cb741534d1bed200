use crate::models::{DbBooking, NewBooking};
use chrono::{NaiveDate, Utc};
use eyre::Result;
use slotbook_core::models::booking::BookingStatus;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const COLUMNS: &str = "id, event_type_id, owner_id, booking_date, start_time, end_time, attendee_name, attendee_email, notes, timezone, status, created_at";

pub async fn create_booking(pool: &Pool<Postgres>, booking: &NewBooking) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, event_type_id={}, date={}, start={}",
        id, booking.event_type_id, booking.booking_date, booking.start_time
    );

    let created = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        INSERT INTO bookings ({COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(booking.event_type_id)
    .bind(booking.owner_id)
    .bind(booking.booking_date)
    .bind(&booking.start_time)
    .bind(&booking.end_time)
    .bind(&booking.attendee_name)
    .bind(&booking.attendee_email)
    .bind(&booking.notes)
    .bind(&booking.timezone)
    .bind(&booking.status)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        "SELECT {COLUMNS} FROM bookings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

pub async fn list_bookings_by_owner(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
    date: Option<NaiveDate>,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM bookings
        WHERE owner_id = $1 AND ($2::DATE IS NULL OR booking_date = $2)
        ORDER BY booking_date ASC, start_time ASC
        "#
    ))
    .bind(owner_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Confirmed bookings of an owner dated `from` through `to`, inclusive.
pub async fn list_confirmed_bookings_between(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM bookings
        WHERE owner_id = $1 AND booking_date BETWEEN $2 AND $3 AND status = $4
        ORDER BY booking_date ASC, start_time ASC
        "#
    ))
    .bind(owner_id)
    .bind(from)
    .bind(to)
    .bind(BookingStatus::Confirmed.as_str())
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: BookingStatus,
) -> Result<Option<DbBooking>> {
    let updated = sqlx::query_as::<_, DbBooking>(&format!(
        "UPDATE bookings SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    if let Some(booking) = &updated {
        tracing::debug!("Booking {} is now {}", booking.id, booking.status);
    }

    Ok(updated)
}
