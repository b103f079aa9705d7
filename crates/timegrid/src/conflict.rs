//! Detect overlapping entries on the same weekday.
//!
//! Ranges are half-open: two slots overlap when `a.start < b.end && b.start < a.end`.
//! Adjacent entries (where one ends exactly when another starts) are NOT overlaps.
//! Overlaps are advisory; deciding whether to proceed is up to the caller.

use crate::entry::{DayTimeSlot, TimeSlot, TimetableEntry};

/// An existing entry that collides with a candidate slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub entry: TimetableEntry,
    pub overlap_minutes: i64,
}

/// A pair of stored entries whose ranges intersect.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub entry_a: TimetableEntry,
    pub entry_b: TimetableEntry,
    pub overlap_minutes: i64,
}

fn intersects(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.start_time < b.end_time && b.start_time < a.end_time
}

fn overlap_minutes(a: &TimeSlot, b: &TimeSlot) -> i64 {
    let start = a.start_time.max(b.start_time);
    let end = a.end_time.min(b.end_time);
    start.minutes_until(end)
}

fn collides(candidate: &DayTimeSlot, entry: &TimetableEntry, exclude_id: Option<&str>) -> bool {
    exclude_id != Some(entry.id.as_str())
        && entry.day == candidate.day
        && intersects(&candidate.slot, &entry.day_slot().slot)
}

/// Whether `candidate` intersects any entry in `existing` on the same day.
///
/// `exclude_id` skips the entry with that id, so an in-place edit does not
/// collide with its own previous record.
pub fn has_overlap(
    candidate: &DayTimeSlot,
    existing: &[TimetableEntry],
    exclude_id: Option<&str>,
) -> bool {
    existing
        .iter()
        .any(|entry| collides(candidate, entry, exclude_id))
}

/// Every entry in `existing` that intersects `candidate`, in collection order.
pub fn find_overlaps(
    candidate: &DayTimeSlot,
    existing: &[TimetableEntry],
    exclude_id: Option<&str>,
) -> Vec<Overlap> {
    existing
        .iter()
        .filter(|entry| collides(candidate, entry, exclude_id))
        .map(|entry| Overlap {
            entry: entry.clone(),
            overlap_minutes: overlap_minutes(&candidate.slot, &entry.day_slot().slot),
        })
        .collect()
}

/// Find all pairwise conflicts within one collection.
///
/// Each pair is reported once, ordered by the position of its first entry.
pub fn find_conflicts(entries: &[TimetableEntry]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (index, a) in entries.iter().enumerate() {
        for b in &entries[index + 1..] {
            let (slot_a, slot_b) = (a.day_slot().slot, b.day_slot().slot);
            if a.day == b.day && intersects(&slot_a, &slot_b) {
                conflicts.push(Conflict {
                    entry_a: a.clone(),
                    entry_b: b.clone(),
                    overlap_minutes: overlap_minutes(&slot_a, &slot_b),
                });
            }
        }
    }

    conflicts
}
