use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create event_types table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_types (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            owner_id UUID NOT NULL,
            slug VARCHAR(100) NOT NULL UNIQUE,
            title VARCHAR(255) NOT NULL,
            description TEXT NULL,
            duration_minutes INTEGER NOT NULL DEFAULT 30,
            price_cents BIGINT NOT NULL DEFAULT 0,
            requires_confirmation BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_duration CHECK (duration_minutes BETWEEN 1 AND 1440)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create availability_windows table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_windows (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            owner_id UUID NOT NULL,
            day_of_week SMALLINT NOT NULL,
            start_time VARCHAR(5) NOT NULL,
            end_time VARCHAR(5) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_window CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            event_type_id UUID NOT NULL REFERENCES event_types(id) ON DELETE CASCADE,
            owner_id UUID NOT NULL,
            booking_date DATE NOT NULL,
            start_time VARCHAR(5) NOT NULL,
            end_time VARCHAR(5) NOT NULL,
            attendee_name VARCHAR(255) NOT NULL,
            attendee_email VARCHAR(255) NOT NULL,
            notes TEXT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'UTC',
            status VARCHAR(16) NOT NULL DEFAULT 'confirmed',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; several statements need the simple query protocol
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_event_types_owner_id ON event_types(owner_id);
        CREATE INDEX IF NOT EXISTS idx_availability_windows_owner_day ON availability_windows(owner_id, day_of_week);
        CREATE INDEX IF NOT EXISTS idx_bookings_owner_date ON bookings(owner_id, booking_date);
        CREATE INDEX IF NOT EXISTS idx_bookings_event_type_id ON bookings(event_type_id);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
