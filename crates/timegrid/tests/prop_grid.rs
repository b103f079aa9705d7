//! Property-based tests for the time grid using proptest.
//!
//! These verify invariants that should hold for *any* valid settings and
//! entry collection, not just the fixed examples in the other test files.

use proptest::prelude::*;
use timegrid::slots::day_boundaries;
use timegrid::{
    build_schedule, generate_time_slots, has_overlap, CalendarSettings, DayOfWeek, DayTimeSlot,
    TimeFormat, TimeOfDay, TimeSlot, TimetableEntry,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_format() -> impl Strategy<Value = TimeFormat> {
    prop_oneof![Just(TimeFormat::Hourly), Just(TimeFormat::HalfHour)]
}

fn arb_day() -> impl Strategy<Value = DayOfWeek> {
    (0usize..7).prop_map(|i| DayOfWeek::ALL[i])
}

/// A format plus two aligned bounds with `start < end`.
fn arb_range() -> impl Strategy<Value = (TimeFormat, TimeOfDay, TimeOfDay)> {
    arb_format().prop_flat_map(|format| {
        let boundaries = day_boundaries(format);
        let n = boundaries.len();
        (0..n - 1)
            .prop_flat_map(move |start| (Just(start), start + 1..n))
            .prop_map(move |(start, end)| (format, boundaries[start], boundaries[end]))
    })
}

/// Settings with a non-empty, duplicate-free subset of weekdays.
fn arb_settings() -> impl Strategy<Value = CalendarSettings> {
    (arb_range(), proptest::bits::u8::between(0, 7)).prop_map(|((format, start, end), mask)| {
        let mut work_days: Vec<DayOfWeek> = DayOfWeek::ALL
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, day)| day)
            .collect();
        if work_days.is_empty() {
            work_days.push(DayOfWeek::Monday);
        }
        CalendarSettings {
            start_time: start,
            end_time: end,
            work_days,
            time_format: format,
        }
    })
}

/// Raw entry shapes: day, start boundary index and length in steps.
fn arb_raw_entries() -> impl Strategy<Value = Vec<(DayOfWeek, usize, usize)>> {
    proptest::collection::vec((arb_day(), 0usize..48, 1usize..6), 0..25)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn entry(id: usize, day: DayOfWeek, start: TimeOfDay, end: TimeOfDay) -> TimetableEntry {
    TimetableEntry {
        id: id.to_string(),
        subject: format!("S{}", id % 4),
        location: String::new(),
        lecturer: String::new(),
        day,
        start_time: start,
        end_time: end,
    }
}

/// Turn raw shapes into aligned entries, optionally dropping any that would
/// overlap an entry already kept.
fn materialize(
    format: TimeFormat,
    raw: &[(DayOfWeek, usize, usize)],
    non_overlapping: bool,
) -> Vec<TimetableEntry> {
    let boundaries = day_boundaries(format);
    let mut entries: Vec<TimetableEntry> = Vec::new();

    for (id, &(day, start_idx, len)) in raw.iter().enumerate() {
        let start_idx = start_idx % (boundaries.len() - 1);
        let end_idx = (start_idx + len).min(boundaries.len() - 1);
        let (start, end) = (boundaries[start_idx], boundaries[end_idx]);
        let candidate = DayTimeSlot::new(day, TimeSlot { start_time: start, end_time: end });

        if non_overlapping && has_overlap(&candidate, &entries, None) {
            continue;
        }
        entries.push(entry(id, day, start, end));
    }

    entries
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Generated slots are strictly increasing and inside [start, end)
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_strictly_increasing_within_range((format, start, end) in arb_range()) {
        let slots = generate_time_slots(format, start, end).unwrap();

        prop_assert!(!slots.is_empty());
        prop_assert_eq!(slots[0], start);
        for window in slots.windows(2) {
            prop_assert!(window[0] < window[1], "not increasing: {} then {}", window[0], window[1]);
            prop_assert_eq!(
                window[0].minutes_until(window[1]),
                i64::from(format.step_minutes())
            );
        }
        for slot in &slots {
            prop_assert!(*slot >= start && *slot < end, "{} outside [{}, {})", slot, start, end);
        }
        // The last slot plus one step closes the range exactly.
        let last = *slots.last().unwrap();
        prop_assert_eq!(last.checked_add_minutes(format.step_minutes()), Some(end));
    }
}

// ---------------------------------------------------------------------------
// Property 2: String order and time order agree for generated labels
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn labels_sort_like_times((format, start, end) in arb_range()) {
        let slots = generate_time_slots(format, start, end).unwrap();
        let labels: Vec<String> = slots.iter().map(ToString::to_string).collect();

        let mut sorted = labels.clone();
        sorted.sort();
        prop_assert_eq!(&sorted, &labels);
        for label in &labels {
            prop_assert_eq!(label.len(), 5, "label {} is not HH:MM", label);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Anchors stay inside the grid and never overlap each other
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn anchors_fit_and_do_not_collide(settings in arb_settings(), raw in arb_raw_entries()) {
        let entries = materialize(settings.time_format, &raw, true);
        let schedule = build_schedule(&entries, &settings).unwrap();
        let columns = schedule.time_slots().len();

        for &day in schedule.work_days() {
            let mut ranges: Vec<(usize, usize)> = Vec::new();
            for placement in schedule.day(day).unwrap().values() {
                let anchor = schedule
                    .anchor_index(placement)
                    .expect("aligned entries always have a column");
                prop_assert!(placement.span >= 1);
                prop_assert!(
                    anchor + placement.span <= columns,
                    "{}: anchor {} + span {} exceeds {} columns",
                    day, anchor, placement.span, columns
                );
                ranges.push((anchor, anchor + placement.span));
            }
            ranges.sort();
            for pair in ranges.windows(2) {
                prop_assert!(pair[0].1 <= pair[1].0, "{}: {:?} overlaps {:?}", day, pair[0], pair[1]);
            }
        }
        prop_assert!(schedule.displaced().is_empty());
    }
}

// ---------------------------------------------------------------------------
// Property 4: Building is deterministic, even with colliding inputs
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn build_is_idempotent(settings in arb_settings(), raw in arb_raw_entries()) {
        let entries = materialize(settings.time_format, &raw, false);

        let first = build_schedule(&entries, &settings).unwrap();
        let second = build_schedule(&entries, &settings).unwrap();

        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Every placed or displaced entry is visible and accounted for
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn visible_entries_are_placed_or_displaced(settings in arb_settings(), raw in arb_raw_entries()) {
        let entries = materialize(settings.time_format, &raw, false);
        let schedule = build_schedule(&entries, &settings).unwrap();

        let visible = entries
            .iter()
            .filter(|e| {
                settings.is_working_day(e.day)
                    && e.start_time >= settings.start_time
                    && e.start_time < settings.end_time
            })
            .count();

        prop_assert_eq!(schedule.len() + schedule.displaced().len(), visible);
    }
}

// ---------------------------------------------------------------------------
// Property 6: Overlap is symmetric
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_is_symmetric(format in arb_format(), raw in proptest::collection::vec((arb_day(), 0usize..48, 1usize..6), 2)) {
        let entries = materialize(format, &raw, false);
        let (a, b) = (&entries[0], &entries[1]);

        let a_hits_b = has_overlap(&a.day_slot(), std::slice::from_ref(b), None);
        let b_hits_a = has_overlap(&b.day_slot(), std::slice::from_ref(a), None);

        prop_assert_eq!(a_hits_b, b_hits_a);
    }
}
