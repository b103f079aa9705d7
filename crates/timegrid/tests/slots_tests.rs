//! Tests for slot generation, slot-range labels and span computation.

use timegrid::{
    format_slot_range, generate_time_slots, slot_span, TimeFormat, TimeOfDay, TimetableError,
};

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn labels(slots: &[TimeOfDay]) -> Vec<String> {
    slots.iter().map(ToString::to_string).collect()
}

#[test]
fn hourly_business_day_has_ten_slots() {
    let slots = generate_time_slots(TimeFormat::Hourly, t("08:00"), t("18:00")).unwrap();

    assert_eq!(slots.len(), 10);
    assert_eq!(
        labels(&slots),
        vec![
            "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00",
            "17:00"
        ]
    );
}

#[test]
fn half_hour_slots() {
    let slots = generate_time_slots(TimeFormat::HalfHour, t("08:00"), t("10:00")).unwrap();
    assert_eq!(labels(&slots), vec!["08:00", "08:30", "09:00", "09:30"]);
}

#[test]
fn half_hour_end_on_half_hour() {
    // End at 17:30: the last slot is 17:00, implicitly ending at 17:30.
    let slots = generate_time_slots(TimeFormat::HalfHour, t("16:00"), t("17:30")).unwrap();
    assert_eq!(labels(&slots), vec!["16:00", "16:30", "17:00"]);
}

#[test]
fn single_slot_range() {
    let slots = generate_time_slots(TimeFormat::Hourly, t("09:00"), t("10:00")).unwrap();
    assert_eq!(labels(&slots), vec!["09:00"]);
}

#[test]
fn reversed_range_is_invalid_range() {
    let err = generate_time_slots(TimeFormat::Hourly, t("10:00"), t("09:00")).unwrap_err();
    assert!(
        matches!(err, TimetableError::InvalidRange { .. }),
        "expected InvalidRange, got {:?}",
        err
    );
}

#[test]
fn empty_range_is_invalid_range() {
    let err = generate_time_slots(TimeFormat::HalfHour, t("09:00"), t("09:00")).unwrap_err();
    assert!(matches!(err, TimetableError::InvalidRange { .. }));
}

#[test]
fn half_hour_bound_on_hourly_grid_is_invalid_time() {
    let err = generate_time_slots(TimeFormat::Hourly, t("08:00"), t("17:30")).unwrap_err();
    assert!(
        matches!(err, TimetableError::InvalidTime(_)),
        "expected InvalidTime, got {:?}",
        err
    );
}

#[test]
fn quarter_hour_bound_is_invalid_time() {
    let err = generate_time_slots(TimeFormat::HalfHour, t("08:15"), t("10:00")).unwrap_err();
    assert!(matches!(err, TimetableError::InvalidTime(_)));
}

#[test]
fn generation_is_repeatable() {
    let a = generate_time_slots(TimeFormat::HalfHour, t("07:00"), t("21:30")).unwrap();
    let b = generate_time_slots(TimeFormat::HalfHour, t("07:00"), t("21:30")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn range_label_uses_next_slot() {
    let slots = generate_time_slots(TimeFormat::Hourly, t("08:00"), t("18:00")).unwrap();
    assert_eq!(
        format_slot_range(t("08:00"), TimeFormat::Hourly, &slots),
        "08:00-09:00"
    );
    assert_eq!(
        format_slot_range(t("12:00"), TimeFormat::Hourly, &slots),
        "12:00-13:00"
    );
}

#[test]
fn last_range_label_ends_at_configured_end() {
    let hourly = generate_time_slots(TimeFormat::Hourly, t("08:00"), t("18:00")).unwrap();
    assert_eq!(
        format_slot_range(t("17:00"), TimeFormat::Hourly, &hourly),
        "17:00-18:00"
    );

    let half = generate_time_slots(TimeFormat::HalfHour, t("08:00"), t("10:00")).unwrap();
    assert_eq!(
        format_slot_range(t("09:30"), TimeFormat::HalfHour, &half),
        "09:30-10:00",
        "last half-hour label must not run a whole hour past the end"
    );
}

#[test]
fn half_hour_range_labels() {
    let slots = generate_time_slots(TimeFormat::HalfHour, t("08:00"), t("10:00")).unwrap();
    let rendered: Vec<String> = slots
        .iter()
        .map(|&s| format_slot_range(s, TimeFormat::HalfHour, &slots))
        .collect();
    assert_eq!(
        rendered,
        vec!["08:00-08:30", "08:30-09:00", "09:00-09:30", "09:30-10:00"]
    );
}

#[test]
fn span_of_two_hour_entry() {
    let slots = generate_time_slots(TimeFormat::Hourly, t("08:00"), t("18:00")).unwrap();
    assert_eq!(slot_span(t("09:00"), t("11:00"), &slots), 2);
}

#[test]
fn span_of_half_hour_entries() {
    let slots = generate_time_slots(TimeFormat::HalfHour, t("08:00"), t("12:00")).unwrap();
    assert_eq!(slot_span(t("08:30"), t("10:00"), &slots), 3);
    assert_eq!(slot_span(t("08:30"), t("09:00"), &slots), 1);
}

#[test]
fn span_falls_back_to_one_when_boundary_missing() {
    let slots = generate_time_slots(TimeFormat::Hourly, t("08:00"), t("18:00")).unwrap();
    // 09:30 is not an hourly boundary.
    assert_eq!(slot_span(t("09:30"), t("11:00"), &slots), 1);
    // 18:00 is the grid end, not a slot start.
    assert_eq!(slot_span(t("16:00"), t("18:00"), &slots), 1);
}

#[test]
fn span_is_at_least_one_for_reversed_boundaries() {
    let slots = generate_time_slots(TimeFormat::Hourly, t("08:00"), t("18:00")).unwrap();
    assert_eq!(slot_span(t("11:00"), t("09:00"), &slots), 1);
}
