pub mod availability;
pub mod bookings;
pub mod event_types;
pub mod health;
