use crate::models::DbAvailabilityWindow;
use chrono::Utc;
use eyre::Result;
use slotbook_core::models::availability::WindowInput;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_window(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
    window: &WindowInput,
) -> Result<DbAvailabilityWindow> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let created = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        INSERT INTO availability_windows (id, owner_id, day_of_week, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, owner_id, day_of_week, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(window.day_of_week)
    .bind(&window.start_time)
    .bind(&window.end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn list_windows_by_owner(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
) -> Result<Vec<DbAvailabilityWindow>> {
    let windows = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        SELECT id, owner_id, day_of_week, start_time, end_time, created_at
        FROM availability_windows
        WHERE owner_id = $1
        ORDER BY day_of_week ASC, start_time ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

pub async fn list_windows_for_day(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
    day_of_week: i16,
) -> Result<Vec<DbAvailabilityWindow>> {
    let windows = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        SELECT id, owner_id, day_of_week, start_time, end_time, created_at
        FROM availability_windows
        WHERE owner_id = $1 AND day_of_week = $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(owner_id)
    .bind(day_of_week)
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

/// Swaps all of an owner's windows for `windows` in one transaction.
pub async fn replace_windows_for_owner(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
    windows: &[WindowInput],
) -> Result<Vec<DbAvailabilityWindow>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM availability_windows WHERE owner_id = $1")
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

    let now = Utc::now();
    let mut created = Vec::with_capacity(windows.len());
    for window in windows {
        let row = sqlx::query_as::<_, DbAvailabilityWindow>(
            r#"
            INSERT INTO availability_windows (id, owner_id, day_of_week, start_time, end_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, day_of_week, start_time, end_time, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(window.day_of_week)
        .bind(&window.start_time)
        .bind(&window.end_time)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        created.push(row);
    }

    tx.commit().await?;

    tracing::debug!(
        "Replaced availability for owner {}: {} windows",
        owner_id,
        created.len()
    );
    Ok(created)
}

/// Returns `false` when no row had the given id.
pub async fn delete_window(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM availability_windows WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
