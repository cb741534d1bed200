//! Narrow data-access seam used by the slot, booking and event type update
//! flows, so they can be exercised against
//! `mock::repositories::MockBookingStore` in tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use slotbook_core::models::event_type::UpdateEventTypeRequest;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbAvailabilityWindow, DbBooking, DbEventType, NewBooking};
use crate::repositories::{availability, booking, event_type};

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn event_type_by_slug(&self, slug: &str) -> Result<Option<DbEventType>>;

    async fn event_type_by_id(&self, id: Uuid) -> Result<Option<DbEventType>>;

    async fn slug_taken(&self, slug: &str) -> Result<bool>;

    /// `None` when the event type no longer exists.
    async fn update_event_type(
        &self,
        id: Uuid,
        changes: UpdateEventTypeRequest,
    ) -> Result<Option<DbEventType>>;

    async fn windows_for_day(
        &self,
        owner_id: Uuid,
        day_of_week: i16,
    ) -> Result<Vec<DbAvailabilityWindow>>;

    /// Confirmed bookings dated the day before `date` through the day after.
    ///
    /// Bookings are dated in their own timezone, so a neighbouring local date
    /// can still overlap `date` in absolute time.
    async fn confirmed_bookings_around(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<DbBooking>>;

    async fn insert_booking(&self, booking: NewBooking) -> Result<DbBooking>;
}

#[async_trait]
impl BookingStore for Pool<Postgres> {
    async fn event_type_by_slug(&self, slug: &str) -> Result<Option<DbEventType>> {
        event_type::get_event_type_by_slug(self, slug).await
    }

    async fn event_type_by_id(&self, id: Uuid) -> Result<Option<DbEventType>> {
        event_type::get_event_type_by_id(self, id).await
    }

    async fn slug_taken(&self, slug: &str) -> Result<bool> {
        event_type::slug_exists(self, slug).await
    }

    async fn update_event_type(
        &self,
        id: Uuid,
        changes: UpdateEventTypeRequest,
    ) -> Result<Option<DbEventType>> {
        event_type::update_event_type(self, id, &changes).await
    }

    async fn windows_for_day(
        &self,
        owner_id: Uuid,
        day_of_week: i16,
    ) -> Result<Vec<DbAvailabilityWindow>> {
        availability::list_windows_for_day(self, owner_id, day_of_week).await
    }

    async fn confirmed_bookings_around(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<DbBooking>> {
        let from = date.pred_opt().unwrap_or(date);
        let to = date.succ_opt().unwrap_or(date);
        booking::list_confirmed_bookings_between(self, owner_id, from, to).await
    }

    async fn insert_booking(&self, new_booking: NewBooking) -> Result<DbBooking> {
        booking::create_booking(self, &new_booking).await
    }
}
