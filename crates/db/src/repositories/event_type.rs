use crate::models::DbEventType;
use chrono::Utc;
use eyre::Result;
use slotbook_core::models::event_type::{CreateEventTypeRequest, UpdateEventTypeRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const COLUMNS: &str = "id, owner_id, slug, title, description, duration_minutes, price_cents, requires_confirmation, created_at";

pub async fn create_event_type(
    pool: &Pool<Postgres>,
    request: &CreateEventTypeRequest,
) -> Result<DbEventType> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating event type: id={}, owner_id={}, slug={}",
        id, request.owner_id, request.slug
    );

    let event_type = sqlx::query_as::<_, DbEventType>(&format!(
        r#"
        INSERT INTO event_types (id, owner_id, slug, title, description, duration_minutes, price_cents, requires_confirmation, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(request.owner_id)
    .bind(&request.slug)
    .bind(&request.title)
    .bind(&request.description)
    .bind(request.duration())
    .bind(request.price_cents)
    .bind(request.requires_confirmation)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(event_type)
}

pub async fn get_event_type_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbEventType>> {
    let event_type = sqlx::query_as::<_, DbEventType>(&format!(
        "SELECT {COLUMNS} FROM event_types WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(event_type)
}

pub async fn get_event_type_by_slug(
    pool: &Pool<Postgres>,
    slug: &str,
) -> Result<Option<DbEventType>> {
    tracing::debug!("Getting event type by slug: {}", slug);

    let event_type = sqlx::query_as::<_, DbEventType>(&format!(
        "SELECT {COLUMNS} FROM event_types WHERE slug = $1"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(event_type)
}

pub async fn slug_exists(pool: &Pool<Postgres>, slug: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM event_types WHERE slug = $1)",
    )
    .bind(slug)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn list_event_types_by_owner(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
) -> Result<Vec<DbEventType>> {
    let event_types = sqlx::query_as::<_, DbEventType>(&format!(
        "SELECT {COLUMNS} FROM event_types WHERE owner_id = $1 ORDER BY created_at ASC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(event_types)
}

/// Applies `changes` on top of the stored row.
///
/// Returns `None` when no event type has the given id, including one deleted
/// between the read and the write.
pub async fn update_event_type(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &UpdateEventTypeRequest,
) -> Result<Option<DbEventType>> {
    let Some(current) = get_event_type_by_id(pool, id).await? else {
        return Ok(None);
    };

    let slug = changes.slug.as_deref().unwrap_or(&current.slug);
    let title = changes.title.as_deref().unwrap_or(&current.title);
    let description = changes.description.clone().or(current.description);
    let duration = changes.duration_minutes.unwrap_or(current.duration_minutes);
    let price = changes.price_cents.unwrap_or(current.price_cents);
    let requires_confirmation = changes
        .requires_confirmation
        .unwrap_or(current.requires_confirmation);

    let updated = sqlx::query_as::<_, DbEventType>(&format!(
        r#"
        UPDATE event_types
        SET slug = $2, title = $3, description = $4, duration_minutes = $5,
            price_cents = $6, requires_confirmation = $7
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(slug)
    .bind(title)
    .bind(description)
    .bind(duration)
    .bind(price)
    .bind(requires_confirmation)
    .fetch_optional(pool)
    .await?;

    if let Some(event_type) = &updated {
        tracing::debug!("Event type updated: id={}, slug={}", event_type.id, event_type.slug);
    }
    Ok(updated)
}

/// Returns `false` when no row had the given id.
pub async fn delete_event_type(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM event_types WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
