mod common;

use axum::http::StatusCode;
use chrono::Utc;
use chrono_tz::Tz;
use common::*;
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name},
    Fake,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use slotbook_api::handlers::bookings::{book_slot, booking_response};
use slotbook_core::{
    errors::BookingError,
    models::booking::{Booking, BookingStatus, CreateBookingRequest},
};
use slotbook_db::{
    mock::repositories::MockBookingStore,
    models::{DbBooking, NewBooking},
};
use uuid::Uuid;

fn booking_request(start_time: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        slug: SLUG.to_string(),
        date: "2030-01-07".to_string(),
        start_time: start_time.to_string(),
        timezone: None,
        attendee_name: Name().fake(),
        attendee_email: SafeEmail().fake(),
        notes: Some("Looking forward to it".to_string()),
    }
}

fn stored(new: NewBooking) -> DbBooking {
    DbBooking {
        id: Uuid::new_v4(),
        event_type_id: new.event_type_id,
        owner_id: new.owner_id,
        booking_date: new.booking_date,
        start_time: new.start_time,
        end_time: new.end_time,
        attendee_name: new.attendee_name,
        attendee_email: new.attendee_email,
        notes: new.notes,
        timezone: new.timezone,
        status: new.status,
        created_at: Utc::now(),
    }
}

/// Monday 09:00-10:00 with the given bookings already confirmed.
fn store(requires_confirmation: bool, existing: Vec<(&'static str, &'static str)>) -> MockBookingStore {
    let mut store = MockBookingStore::new();
    store
        .expect_event_type_by_slug()
        .returning(move |_| Ok(Some(event_type_row(30, requires_confirmation))));
    store
        .expect_windows_for_day()
        .returning(|_, _| Ok(vec![window_row(1, "09:00", "10:00")]));
    store
        .expect_confirmed_bookings_around()
        .returning(move |_, date| {
            Ok(existing
                .iter()
                .map(|(start, end)| booking_row(date, start, end, "confirmed"))
                .collect())
        });
    store
}

#[tokio::test]
async fn test_book_free_slot_is_confirmed() {
    let mut store = store(false, vec![]);
    store
        .expect_insert_booking()
        .withf(|new| {
            new.start_time == "09:15"
                && new.end_time == "09:45"
                && new.status == "confirmed"
                && new.timezone == "UTC"
                && new.owner_id == owner_id()
        })
        .times(1)
        .returning(|new| Ok(stored(new)));

    let booking = book_slot(&store, booking_request("09:15"), Tz::UTC, long_before())
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.booking_date, monday());
    assert_eq!(booking.end_time, "09:45");
}

#[tokio::test]
async fn test_book_slot_requiring_confirmation_is_pending() {
    let mut store = store(true, vec![]);
    store
        .expect_insert_booking()
        .withf(|new| new.status == "pending")
        .times(1)
        .returning(|new| Ok(stored(new)));

    let booking = book_slot(&store, booking_request("09:00"), Tz::UTC, long_before())
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_book_slot_stores_requested_timezone_and_trimmed_attendee() {
    let mut store = store(false, vec![]);
    store
        .expect_insert_booking()
        .withf(|new| {
            new.timezone == "Europe/Zurich"
                && new.attendee_name == "Grace Hopper"
                && new.attendee_email == "grace@example.com"
        })
        .times(1)
        .returning(|new| Ok(stored(new)));

    let mut request = booking_request("09:30");
    request.timezone = Some("Europe/Zurich".to_string());
    request.attendee_name = "  Grace Hopper ".to_string();
    request.attendee_email = "grace@example.com ".to_string();

    let booking = book_slot(&store, request, Tz::UTC, long_before()).await.unwrap();
    assert_eq!(booking.timezone, "Europe/Zurich");
}

#[rstest]
#[case::overlaps_existing("09:15")]
#[case::starts_on_existing("09:30")]
#[case::off_grid("09:10")]
#[case::runs_past_window("09:45")]
#[case::outside_window("11:00")]
#[tokio::test]
async fn test_book_unavailable_start_is_conflict(#[case] start_time: &str) {
    let mut store = store(false, vec![("09:30", "10:00")]);
    store.expect_insert_booking().times(0);

    let err = book_slot(&store, booking_request(start_time), Tz::UTC, long_before())
        .await
        .unwrap_err();

    assert!(matches!(err.0, BookingError::Conflict(_)));
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_book_slot_in_the_past_is_conflict() {
    let mut store = store(false, vec![]);
    store.expect_insert_booking().times(0);

    // 09:00 has already started at 09:05 on the same day
    let err = book_slot(&store, booking_request("09:00"), Tz::UTC, at(9, 5))
        .await
        .unwrap_err();

    assert!(matches!(err.0, BookingError::Conflict(_)));
}

#[tokio::test]
async fn test_booking_made_in_another_timezone_blocks_double_booking() {
    let mut store = MockBookingStore::new();
    store
        .expect_event_type_by_slug()
        .returning(|_| Ok(Some(event_type_row(30, false))));
    store
        .expect_windows_for_day()
        .returning(|_, _| Ok(vec![window_row(1, "08:00", "10:00")]));
    store.expect_confirmed_bookings_around().returning(|_, date| {
        let mut booking = booking_row(date, "09:00", "09:30", "confirmed");
        booking.timezone = "Europe/Zurich".to_string();
        Ok(vec![booking])
    });
    store.expect_insert_booking().times(0);

    // 08:00 UTC is the Zurich booking's 09:00
    let err = book_slot(&store, booking_request("08:00"), Tz::UTC, long_before())
        .await
        .unwrap_err();

    assert!(matches!(err.0, BookingError::Conflict(_)));
}

#[rstest]
#[case::blank_name("   ", "ada@example.com", "09:00")]
#[case::email_without_at("Ada", "ada.example.com", "09:00")]
#[case::email_without_domain_dot("Ada", "ada@localhost", "09:00")]
#[case::malformed_start("Ada", "ada@example.com", "9am")]
#[tokio::test]
async fn test_book_invalid_request_never_reaches_store(
    #[case] name: &str,
    #[case] email: &str,
    #[case] start_time: &str,
) {
    let store = MockBookingStore::new();
    let mut request = booking_request(start_time);
    request.attendee_name = name.to_string();
    request.attendee_email = email.to_string();

    let err = book_slot(&store, request, Tz::UTC, long_before())
        .await
        .unwrap_err();

    assert!(matches!(err.0, BookingError::Validation(_)));
}

#[tokio::test]
async fn test_book_unknown_event_type_is_not_found() {
    let mut store = MockBookingStore::new();
    store.expect_event_type_by_slug().returning(|_| Ok(None));

    let err = book_slot(&store, booking_request("09:00"), Tz::UTC, long_before())
        .await
        .unwrap_err();

    assert!(matches!(err.0, BookingError::NotFound(_)));
}

#[test]
fn test_booking_response_converts_wall_clock_in_booking_timezone() {
    let mut row = booking_row(monday(), "09:00", "09:30", "confirmed");
    row.timezone = "Europe/Zurich".to_string();
    let booking = Booking::try_from(row).unwrap();

    let response = booking_response(&booking).unwrap();

    assert_eq!(response.start, at(8, 0));
    assert_eq!(response.end, at(8, 30));
    assert_eq!(response.start_time, "09:00");
    assert_eq!(response.status, BookingStatus::Confirmed);
}

#[test]
fn test_booking_response_rejects_unknown_timezone() {
    let mut row = booking_row(monday(), "09:00", "09:30", "pending");
    row.timezone = "Nowhere/Special".to_string();
    let booking = Booking::try_from(row).unwrap();

    assert!(matches!(
        booking_response(&booking),
        Err(BookingError::Validation(_))
    ));
}
