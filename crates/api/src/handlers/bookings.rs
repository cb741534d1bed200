//! # Booking Handlers
//!
//! Public booking of a generated slot, plus the owner's booking list and
//! status changes.
//!
//! A booking is accepted only if its start matches a slot that the slot
//! generator currently reports as available. This is a read-time check:
//! two requests racing for the same slot can both pass it.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        availability::AvailabilityWindow,
        booking::{
            Booking, BookingListQuery, BookingResponse, BookingStatus, CreateBookingRequest,
            UpdateBookingStatusRequest,
        },
        slot::SlotMode,
    },
    slots::{generate_slots, local_to_utc, SlotRequest},
    time::{day_of_week, parse_clock_time, parse_date, parse_timezone},
};
use slotbook_db::{models::NewBooking, repositories::booking, BookingStore};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{handlers::resolve_timezone, middleware::error_handling::AppError, ApiState};

/// Books the slot described by `request` if it is still available.
///
/// # Errors
///
/// * `BookingError::Validation` - Malformed date, time, timezone or attendee
/// * `BookingError::NotFound` - Unknown event type slug
/// * `BookingError::Conflict` - The start is not an available slot
/// * `BookingError::Database` - Repository failure
pub async fn book_slot<S>(
    store: &S,
    request: CreateBookingRequest,
    default_timezone: Tz,
    now: DateTime<Utc>,
) -> Result<Booking, AppError>
where
    S: BookingStore + ?Sized,
{
    request.validate()?;
    let date = parse_date(&request.date)?;
    let start_time = parse_clock_time(&request.start_time)?;
    let timezone = resolve_timezone(request.timezone.as_deref(), default_timezone)?;

    let event_type = store
        .event_type_by_slug(&request.slug)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Event type '{}' not found", request.slug))
        })?;

    let windows: Vec<AvailabilityWindow> = store
        .windows_for_day(event_type.owner_id, day_of_week(date))
        .await?
        .into_iter()
        .map(AvailabilityWindow::from)
        .collect();
    let existing: Vec<_> = store
        .confirmed_bookings_around(event_type.owner_id, date)
        .await?
        .iter()
        .map(|booking| booking.interval())
        .collect();

    let slots = generate_slots(&SlotRequest {
        date,
        windows: &windows,
        bookings: &existing,
        duration_minutes: event_type.duration_minutes,
        mode: SlotMode::AvailableOnly,
        timezone,
        now,
    })?;

    let start = local_to_utc(&timezone, date, start_time).ok_or_else(|| {
        BookingError::Validation(format!(
            "{} {} does not exist in {}",
            request.date, request.start_time, timezone
        ))
    })?;

    if !slots.iter().any(|slot| slot.start == start) {
        return Err(AppError(BookingError::Conflict(format!(
            "{} {} is not an available slot for '{}'",
            request.date, request.start_time, request.slug
        ))));
    }

    let end_time = date.and_time(start_time) + Duration::minutes(i64::from(event_type.duration_minutes));
    let status = if event_type.requires_confirmation {
        BookingStatus::Pending
    } else {
        BookingStatus::Confirmed
    };

    let created = store
        .insert_booking(NewBooking {
            event_type_id: event_type.id,
            owner_id: event_type.owner_id,
            booking_date: date,
            start_time: request.start_time.clone(),
            end_time: end_time.format("%H:%M").to_string(),
            attendee_name: request.attendee_name.trim().to_string(),
            attendee_email: request.attendee_email.trim().to_string(),
            notes: request.notes,
            timezone: timezone.name().to_string(),
            status: status.as_str().to_string(),
        })
        .await?;

    info!(
        "Booked {} on {} at {} ({}) for event type {}",
        created.id, created.booking_date, created.start_time, created.status, event_type.slug
    );

    Ok(Booking::try_from(created)?)
}

/// Absolute start and end of a stored booking, read in its own timezone.
pub fn booking_response(booking: &Booking) -> BookingResult<BookingResponse> {
    let timezone = parse_timezone(&booking.timezone)?;
    let start_time = parse_clock_time(&booking.start_time)?;
    let end_time = parse_clock_time(&booking.end_time)?;

    let start = local_to_utc(&timezone, booking.booking_date, start_time).ok_or_else(|| {
        BookingError::Validation(format!(
            "Booking {} starts at a time that does not exist in {}",
            booking.id, booking.timezone
        ))
    })?;
    let end = start + (end_time - start_time);

    Ok(BookingResponse {
        id: booking.id,
        event_type_id: booking.event_type_id,
        date: booking.booking_date,
        start_time: booking.start_time.clone(),
        end_time: booking.end_time.clone(),
        start,
        end,
        status: booking.status,
    })
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking = book_slot(&state.db_pool, payload, state.default_timezone, Utc::now()).await?;
    let response = booking_response(&booking)?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let date = query.date.as_deref().map(parse_date).transpose()?;

    let rows = booking::list_bookings_by_owner(&state.db_pool, query.owner_id, date).await?;
    let bookings = rows
        .into_iter()
        .map(Booking::try_from)
        .collect::<eyre::Result<Vec<_>>>()?;

    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let row = booking::get_booking_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;

    Ok(Json(Booking::try_from(row)?))
}

#[axum::debug_handler]
pub async fn update_booking_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    let row = booking::update_booking_status(&state.db_pool, id, payload.status)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;

    info!("Booking {} set to {}", id, payload.status);
    Ok(Json(Booking::try_from(row)?))
}
