use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use slotbook_core::{
    errors::BookingError,
    models::{
        availability::OwnerQuery,
        event_type::{CreateEventTypeRequest, EventType, UpdateEventTypeRequest},
    },
};
use slotbook_db::{repositories::event_type, BookingStore};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_event_type(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateEventTypeRequest>,
) -> Result<(StatusCode, Json<EventType>), AppError> {
    payload.validate()?;

    if event_type::slug_exists(&state.db_pool, &payload.slug).await? {
        return Err(AppError(BookingError::Conflict(format!(
            "Slug '{}' is already taken",
            payload.slug
        ))));
    }

    let created = event_type::create_event_type(&state.db_pool, &payload).await?;
    info!("Created event type {} ({})", created.slug, created.id);

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[axum::debug_handler]
pub async fn list_event_types(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<EventType>>, AppError> {
    let rows = event_type::list_event_types_by_owner(&state.db_pool, query.owner_id).await?;
    Ok(Json(rows.into_iter().map(EventType::from).collect()))
}

#[axum::debug_handler]
pub async fn get_event_type(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
) -> Result<Json<EventType>, AppError> {
    let row = event_type::get_event_type_by_slug(&state.db_pool, &slug)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Event type '{}' not found", slug)))?;

    Ok(Json(row.into()))
}

/// Validates and applies a partial update to the event type `id`.
///
/// # Errors
///
/// * `BookingError::Validation` - A changed field is invalid
/// * `BookingError::NotFound` - No event type has the id, also when it is
///   deleted while the update runs
/// * `BookingError::Conflict` - The new slug belongs to another event type
pub async fn apply_event_type_update<S>(
    store: &S,
    id: Uuid,
    changes: UpdateEventTypeRequest,
) -> Result<EventType, AppError>
where
    S: BookingStore + ?Sized,
{
    changes.validate()?;
    let not_found = || BookingError::NotFound(format!("Event type with ID {} not found", id));

    let current = store.event_type_by_id(id).await?.ok_or_else(not_found)?;

    if let Some(slug) = &changes.slug {
        if *slug != current.slug && store.slug_taken(slug).await? {
            return Err(AppError(BookingError::Conflict(format!(
                "Slug '{}' is already taken",
                slug
            ))));
        }
    }

    let updated = store
        .update_event_type(id, changes)
        .await?
        .ok_or_else(not_found)?;

    info!("Updated event type {} ({})", updated.slug, updated.id);
    Ok(updated.into())
}

#[axum::debug_handler]
pub async fn update_event_type(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventTypeRequest>,
) -> Result<Json<EventType>, AppError> {
    let updated = apply_event_type_update(&state.db_pool, id, payload).await?;
    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn delete_event_type(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !event_type::delete_event_type(&state.db_pool, id).await? {
        return Err(AppError(BookingError::NotFound(format!(
            "Event type with ID {} not found",
            id
        ))));
    }

    info!("Deleted event type {}", id);
    Ok(StatusCode::NO_CONTENT)
}
