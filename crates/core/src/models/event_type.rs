use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

pub const DEFAULT_DURATION_MINUTES: i32 = 30;
pub const MAX_DURATION_MINUTES: i32 = 24 * 60;

/// A bookable session template owned by a calendar owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventType {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventTypeRequest {
    pub owner_id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub requires_confirmation: bool,
}

impl CreateEventTypeRequest {
    pub fn duration(&self) -> i32 {
        self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES)
    }

    pub fn validate(&self) -> BookingResult<()> {
        validate_slug(&self.slug)?;
        validate_title(&self.title)?;
        validate_duration(self.duration())?;
        validate_price(self.price_cents)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventTypeRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
    pub requires_confirmation: Option<bool>,
}

impl UpdateEventTypeRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(duration) = self.duration_minutes {
            validate_duration(duration)?;
        }
        if let Some(price) = self.price_cents {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// Slugs appear in public booking links: lowercase ASCII, digits and dashes.
pub fn validate_slug(slug: &str) -> BookingResult<()> {
    let valid = !slug.is_empty()
        && slug.len() <= 100
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(BookingError::Validation(format!(
            "Invalid slug '{}'. Use lowercase letters, digits and dashes",
            slug
        )))
    }
}

fn validate_title(title: &str) -> BookingResult<()> {
    if title.trim().is_empty() {
        return Err(BookingError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}

pub fn validate_duration(duration_minutes: i32) -> BookingResult<()> {
    if !(1..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
        return Err(BookingError::Validation(format!(
            "Duration must be between 1 and {} minutes, got {}",
            MAX_DURATION_MINUTES, duration_minutes
        )));
    }
    Ok(())
}

fn validate_price(price_cents: i64) -> BookingResult<()> {
    if price_cents < 0 {
        return Err(BookingError::Validation("Price cannot be negative".to_string()));
    }
    Ok(())
}
