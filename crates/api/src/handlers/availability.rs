//! # Availability Handlers
//!
//! The public slot lookup used by the booking page, and the admin endpoints
//! that manage an owner's weekly availability windows.
//!
//! ## Slot lookup
//!
//! 1. Parse the date and resolve the timezone (falling back to the server default)
//! 2. Look up the event type by slug for its owner and duration
//! 3. Fetch the owner's windows for the weekday and the confirmed bookings
//!    around the date (each read in the timezone it was made in)
//! 4. Hand everything to `slotbook_core::slots::generate_slots`
//!
//! Request validation happens before any database access, so malformed
//! input is rejected cheaply.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use slotbook_core::{
    errors::BookingError,
    models::{
        availability::{
            AvailabilityWindow, CreateWindowRequest, OwnerQuery, ReplaceWindowsRequest,
            WindowResponse,
        },
        slot::{SlotMode, SlotQuery, TimeSlot},
    },
    slots::{generate_slots, SlotRequest},
    time::{day_of_week, parse_date},
};
use slotbook_db::{models::DbAvailabilityWindow, repositories::availability, BookingStore};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{handlers::resolve_timezone, middleware::error_handling::AppError, ApiState};

/// Computes the slots answered by `GET /api/availability/slots`.
///
/// # Errors
///
/// * `BookingError::Validation` - Unparsable date, unknown timezone or a
///   malformed stored window
/// * `BookingError::NotFound` - No event type has the requested slug
/// * `BookingError::Database` - Repository failure
pub async fn find_slots<S>(
    store: &S,
    query: &SlotQuery,
    default_timezone: Tz,
    now: DateTime<Utc>,
) -> Result<Vec<TimeSlot>, AppError>
where
    S: BookingStore + ?Sized,
{
    let date = parse_date(&query.date)?;
    let timezone = resolve_timezone(query.timezone.as_deref(), default_timezone)?;

    let event_type = store
        .event_type_by_slug(&query.slug)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Event type '{}' not found", query.slug))
        })?;

    let windows: Vec<AvailabilityWindow> = store
        .windows_for_day(event_type.owner_id, day_of_week(date))
        .await?
        .into_iter()
        .map(AvailabilityWindow::from)
        .collect();

    let bookings: Vec<_> = store
        .confirmed_bookings_around(event_type.owner_id, date)
        .await?
        .iter()
        .map(|booking| booking.interval())
        .collect();

    debug!(
        "Slot lookup: slug={}, date={}, tz={}, windows={}, bookings={}",
        query.slug,
        date,
        timezone,
        windows.len(),
        bookings.len()
    );

    let slots = generate_slots(&SlotRequest {
        date,
        windows: &windows,
        bookings: &bookings,
        duration_minutes: event_type.duration_minutes,
        mode: SlotMode::from_include_booked(query.include_booked),
        timezone,
        now,
    })?;

    Ok(slots)
}

/// Lists bookable slots of an event type for one day
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/slots?slug=intro-call&date=2030-01-07&timezone=Europe/Zurich
/// ```
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let slots = find_slots(&state.db_pool, &query, state.default_timezone, Utc::now()).await?;
    Ok(Json(slots))
}

fn to_response(row: DbAvailabilityWindow) -> WindowResponse {
    AvailabilityWindow::from(row).into()
}

#[axum::debug_handler]
pub async fn list_windows(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<WindowResponse>>, AppError> {
    let windows = availability::list_windows_by_owner(&state.db_pool, query.owner_id).await?;
    Ok(Json(windows.into_iter().map(to_response).collect()))
}

#[axum::debug_handler]
pub async fn create_window(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateWindowRequest>,
) -> Result<(StatusCode, Json<WindowResponse>), AppError> {
    payload.window.validate()?;

    let window =
        availability::create_window(&state.db_pool, payload.owner_id, &payload.window).await?;

    Ok((StatusCode::CREATED, Json(to_response(window))))
}

/// Replaces every window of an owner; an empty list clears the schedule.
#[axum::debug_handler]
pub async fn replace_windows(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ReplaceWindowsRequest>,
) -> Result<Json<Vec<WindowResponse>>, AppError> {
    for window in &payload.windows {
        window.validate()?;
    }

    let windows =
        availability::replace_windows_for_owner(&state.db_pool, payload.owner_id, &payload.windows)
            .await?;

    Ok(Json(windows.into_iter().map(to_response).collect()))
}

#[axum::debug_handler]
pub async fn delete_window(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !availability::delete_window(&state.db_pool, id).await? {
        return Err(AppError(BookingError::NotFound(format!(
            "Availability window with ID {} not found",
            id
        ))));
    }
    Ok(StatusCode::NO_CONTENT)
}
