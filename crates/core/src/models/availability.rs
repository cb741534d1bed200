use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::time::validate_time_range;

/// A recurring weekly period during which an owner accepts bookings.
///
/// Times are wall-clock `HH:MM` strings interpreted in the timezone of the
/// request that reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// 0 = Sunday through 6 = Saturday
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowInput {
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
}

impl WindowInput {
    pub fn validate(&self) -> BookingResult<()> {
        if !(0..=6).contains(&self.day_of_week) {
            return Err(BookingError::Validation(format!(
                "day_of_week must be between 0 and 6, got {}",
                self.day_of_week
            )));
        }
        validate_time_range(&self.start_time, &self.end_time)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWindowRequest {
    pub owner_id: Uuid,
    #[serde(flatten)]
    pub window: WindowInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceWindowsRequest {
    pub owner_id: Uuid,
    #[serde(default)]
    pub windows: Vec<WindowInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
}

impl From<AvailabilityWindow> for WindowResponse {
    fn from(window: AvailabilityWindow) -> Self {
        Self {
            id: window.id,
            owner_id: window.owner_id,
            day_of_week: window.day_of_week,
            start_time: window.start_time,
            end_time: window.end_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Uuid,
}
