use chrono::{NaiveDate, TimeZone, Utc};
use fake::{
    faker::{internet::en::SafeEmail, lorem::en::Sentence, name::en::Name},
    Fake,
};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use slotbook_core::models::{
    availability::AvailabilityWindow,
    booking::{BookedInterval, Booking, BookingStatus},
    event_type::EventType,
};
use slotbook_db::models::{DbAvailabilityWindow, DbBooking, DbEventType};
use uuid::Uuid;

#[fixture]
fn booking_row() -> DbBooking {
    DbBooking {
        id: Uuid::new_v4(),
        event_type_id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        booking_date: NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(),
        start_time: "09:00".to_string(),
        end_time: "09:30".to_string(),
        attendee_name: Name().fake(),
        attendee_email: SafeEmail().fake(),
        notes: Some(Sentence(3..8).fake()),
        timezone: "Europe/Zurich".to_string(),
        status: "confirmed".to_string(),
        created_at: Utc.with_ymd_and_hms(2029, 12, 1, 12, 0, 0).unwrap(),
    }
}

#[rstest]
fn test_event_type_row_converts_field_for_field() {
    let row = DbEventType {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        slug: "intro-call".to_string(),
        title: "Intro call".to_string(),
        description: Some("Fifteen minutes to get to know each other".to_string()),
        duration_minutes: 15,
        price_cents: 2500,
        requires_confirmation: true,
        created_at: Utc::now(),
    };

    let event_type = EventType::from(row.clone());

    assert_eq!(event_type.id, row.id);
    assert_eq!(event_type.slug, row.slug);
    assert_eq!(event_type.duration_minutes, 15);
    assert_eq!(event_type.price_cents, 2500);
    assert!(event_type.requires_confirmation);
}

#[rstest]
fn test_window_row_drops_timestamp() {
    let row = DbAvailabilityWindow {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        day_of_week: 3,
        start_time: "13:00".to_string(),
        end_time: "17:30".to_string(),
        created_at: Utc::now(),
    };

    let window = AvailabilityWindow::from(row.clone());

    assert_eq!(
        window,
        AvailabilityWindow {
            id: row.id,
            owner_id: row.owner_id,
            day_of_week: 3,
            start_time: "13:00".to_string(),
            end_time: "17:30".to_string(),
        }
    );
}

#[rstest]
fn test_booking_row_interval(booking_row: DbBooking) {
    assert_eq!(
        booking_row.interval(),
        BookedInterval {
            date: NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(),
            start_time: "09:00".to_string(),
            end_time: "09:30".to_string(),
            timezone: Some("Europe/Zurich".to_string()),
        }
    );
}

#[rstest]
#[case("pending", BookingStatus::Pending)]
#[case("confirmed", BookingStatus::Confirmed)]
#[case("cancelled", BookingStatus::Cancelled)]
fn test_booking_row_status_parses(
    mut booking_row: DbBooking,
    #[case] raw: &str,
    #[case] expected: BookingStatus,
) {
    booking_row.status = raw.to_string();
    let attendee = booking_row.attendee_email.clone();

    let booking = Booking::try_from(booking_row).unwrap();

    assert_eq!(booking.status, expected);
    assert_eq!(booking.attendee_email, attendee);
    assert_eq!(booking.timezone, "Europe/Zurich");
}

#[rstest]
fn test_booking_row_with_unknown_status_fails(mut booking_row: DbBooking) {
    booking_row.status = "tentative".to_string();
    let id = booking_row.id;

    let err = Booking::try_from(booking_row).unwrap_err();

    assert!(err.to_string().contains(&id.to_string()));
    assert!(err.to_string().contains("tentative"));
}
