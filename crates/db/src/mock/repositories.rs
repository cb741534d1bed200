use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use slotbook_core::models::event_type::UpdateEventTypeRequest;
use uuid::Uuid;

use crate::models::{DbAvailabilityWindow, DbBooking, DbEventType, NewBooking};
use crate::store::BookingStore;

// Mock store for handler tests
mock! {
    pub BookingStore {}

    #[async_trait]
    impl BookingStore for BookingStore {
        async fn event_type_by_slug(&self, slug: &str) -> eyre::Result<Option<DbEventType>>;

        async fn event_type_by_id(&self, id: Uuid) -> eyre::Result<Option<DbEventType>>;

        async fn slug_taken(&self, slug: &str) -> eyre::Result<bool>;

        async fn update_event_type(
            &self,
            id: Uuid,
            changes: UpdateEventTypeRequest,
        ) -> eyre::Result<Option<DbEventType>>;

        async fn windows_for_day(
            &self,
            owner_id: Uuid,
            day_of_week: i16,
        ) -> eyre::Result<Vec<DbAvailabilityWindow>>;

        async fn confirmed_bookings_around(
            &self,
            owner_id: Uuid,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbBooking>>;

        async fn insert_booking(&self, booking: NewBooking) -> eyre::Result<DbBooking>;
    }
}
