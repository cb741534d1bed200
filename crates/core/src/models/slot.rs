use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate bookable interval. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available: bool,
}

/// Which slots the generator hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotMode {
    /// Only slots that do not overlap a booking.
    #[default]
    AvailableOnly,
    /// Every candidate, with `available` set to false where booked.
    All,
}

impl SlotMode {
    pub fn from_include_booked(include_booked: bool) -> Self {
        if include_booked { Self::All } else { Self::AvailableOnly }
    }
}

/// Query string of the public slot endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotQuery {
    /// Event type slug
    pub slug: String,
    /// Requested day in YYYY-MM-DD format
    pub date: String,
    /// IANA timezone the availability is read in, e.g. `Europe/Zurich`
    pub timezone: Option<String>,
    /// Return booked candidates too, flagged `available: false`
    #[serde(default)]
    pub include_booked: bool,
}
