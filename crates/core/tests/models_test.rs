use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use serde_test::{assert_tokens, Token};
use slotbook_core::{
    errors::BookingError,
    models::{
        availability::{CreateWindowRequest, WindowInput},
        booking::{BookingStatus, CreateBookingRequest},
        event_type::{CreateEventTypeRequest, UpdateEventTypeRequest, DEFAULT_DURATION_MINUTES},
        slot::{SlotMode, SlotQuery, TimeSlot},
    },
    time::{day_of_week, parse_clock_time, parse_date, parse_timezone},
};
use uuid::Uuid;

#[test]
fn test_time_slot_json_shape() {
    let slot = TimeSlot {
        start: Utc.with_ymd_and_hms(2030, 1, 7, 9, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2030, 1, 7, 9, 30, 0).unwrap(),
        available: true,
    };

    let value = to_value(&slot).expect("Failed to serialize slot");

    assert_eq!(
        value,
        json!({
            "start": "2030-01-07T09:00:00Z",
            "end": "2030-01-07T09:30:00Z",
            "available": true
        })
    );
}

#[test]
fn test_booking_status_tokens() {
    assert_tokens(
        &BookingStatus::Confirmed,
        &[Token::UnitVariant {
            name: "BookingStatus",
            variant: "confirmed",
        }],
    );
    assert_tokens(
        &BookingStatus::Cancelled,
        &[Token::UnitVariant {
            name: "BookingStatus",
            variant: "cancelled",
        }],
    );
}

#[rstest]
#[case("pending", BookingStatus::Pending)]
#[case("confirmed", BookingStatus::Confirmed)]
#[case("cancelled", BookingStatus::Cancelled)]
fn test_booking_status_parse(#[case] raw: &str, #[case] expected: BookingStatus) {
    let parsed: BookingStatus = raw.parse().unwrap();
    assert_eq!(parsed, expected);
    assert_eq!(parsed.as_str(), raw);
}

#[test]
fn test_booking_status_parse_unknown() {
    let result = "rescheduled".parse::<BookingStatus>();
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[test]
fn test_slot_mode_from_flag() {
    assert_eq!(SlotMode::from_include_booked(true), SlotMode::All);
    assert_eq!(SlotMode::from_include_booked(false), SlotMode::AvailableOnly);
    assert_eq!(SlotMode::default(), SlotMode::AvailableOnly);
}

#[test]
fn test_slot_query_defaults() {
    let query: SlotQuery = from_str(r#"{"slug": "intro-call", "date": "2030-01-07"}"#).unwrap();

    assert_eq!(query.slug, "intro-call");
    assert_eq!(query.timezone, None);
    assert!(!query.include_booked);
}

#[rstest]
#[case(1, "09:00", "17:00", true)]
#[case(0, "00:00", "23:59", true)]
#[case(7, "09:00", "17:00", false)]
#[case(-1, "09:00", "17:00", false)]
#[case(1, "17:00", "09:00", false)]
#[case(1, "9:00", "17:00", false)]
fn test_window_input_validation(
    #[case] day_of_week: i16,
    #[case] start: &str,
    #[case] end: &str,
    #[case] valid: bool,
) {
    let input = WindowInput {
        day_of_week,
        start_time: start.to_string(),
        end_time: end.to_string(),
    };

    assert_eq!(input.validate().is_ok(), valid);
}

#[test]
fn test_create_window_request_is_flat() {
    let owner_id = Uuid::new_v4();
    let body = json!({
        "owner_id": owner_id,
        "day_of_week": 3,
        "start_time": "09:00",
        "end_time": "12:00"
    });

    let request: CreateWindowRequest = serde_json::from_value(body).unwrap();

    assert_eq!(request.owner_id, owner_id);
    assert_eq!(request.window.day_of_week, 3);
    assert_eq!(request.window.end_time, "12:00");
}

fn event_type_request(slug: &str, title: &str, duration: Option<i32>) -> CreateEventTypeRequest {
    CreateEventTypeRequest {
        owner_id: Uuid::new_v4(),
        slug: slug.to_string(),
        title: title.to_string(),
        description: None,
        duration_minutes: duration,
        price_cents: 0,
        requires_confirmation: false,
    }
}

#[test]
fn test_event_type_default_duration() {
    let request = event_type_request("intro-call", "Intro call", None);

    assert_eq!(request.duration(), DEFAULT_DURATION_MINUTES);
    assert!(request.validate().is_ok());
}

#[rstest]
#[case("Intro-Call", "Intro call", Some(30))]
#[case("", "Intro call", Some(30))]
#[case("intro call", "Intro call", Some(30))]
#[case("intro-call", "   ", Some(30))]
#[case("intro-call", "Intro call", Some(0))]
#[case("intro-call", "Intro call", Some(1441))]
fn test_event_type_rejects(
    #[case] slug: &str,
    #[case] title: &str,
    #[case] duration: Option<i32>,
) {
    let request = event_type_request(slug, title, duration);
    assert!(matches!(request.validate(), Err(BookingError::Validation(_))));
}

#[test]
fn test_event_type_update_validates_present_fields_only() {
    let empty = UpdateEventTypeRequest::default();
    assert!(empty.validate().is_ok());

    let bad_price = UpdateEventTypeRequest {
        price_cents: Some(-1),
        ..Default::default()
    };
    assert!(bad_price.validate().is_err());
}

#[rstest]
#[case("Ada Lovelace", "ada@example.com", true)]
#[case("", "ada@example.com", false)]
#[case("Ada Lovelace", "ada.example.com", false)]
#[case("Ada Lovelace", "@example.com", false)]
#[case("Ada Lovelace", "ada@localhost", false)]
fn test_create_booking_validation(#[case] name: &str, #[case] email: &str, #[case] valid: bool) {
    let request = CreateBookingRequest {
        slug: "intro-call".to_string(),
        date: "2030-01-07".to_string(),
        start_time: "09:00".to_string(),
        timezone: None,
        attendee_name: name.to_string(),
        attendee_email: email.to_string(),
        notes: None,
    };

    assert_eq!(request.validate().is_ok(), valid);
}

#[test]
fn test_time_helpers() {
    assert_eq!(
        parse_clock_time("07:45").unwrap(),
        chrono::NaiveTime::from_hms_opt(7, 45, 0).unwrap()
    );
    assert_eq!(
        parse_date("2030-01-07").unwrap(),
        NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()
    );
    assert!(parse_date("07.01.2030").is_err());
    assert!(parse_timezone("Europe/Zurich").is_ok());
    assert!(matches!(
        parse_timezone("Mars/Olympus"),
        Err(BookingError::Validation(_))
    ));
    assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2030, 1, 6).unwrap()), 0);
    assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2030, 1, 12).unwrap()), 6);
}

#[rstest]
#[case("+262142-12-31")]
#[case("-0001-01-01")]
#[case("1899-12-31")]
#[case("10000-01-01")]
fn test_parse_date_rejects_years_out_of_range(#[case] value: &str) {
    assert!(matches!(parse_date(value), Err(BookingError::Validation(_))));
}

#[test]
fn test_parse_date_accepts_range_bounds() {
    assert!(parse_date("1900-01-01").is_ok());
    assert!(parse_date("9999-12-31").is_ok());
}
