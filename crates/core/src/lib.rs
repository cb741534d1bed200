//! # Slotbook Core
//!
//! Domain types shared by the API and persistence crates, plus the slot
//! generator that turns weekly availability into bookable time slots.

pub mod errors;
pub mod models;
pub mod slots;
pub mod time;

pub use errors::{BookingError, BookingResult};
pub use slots::{generate_slots, SlotRequest};
