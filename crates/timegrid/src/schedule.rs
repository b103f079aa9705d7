//! Occupancy map: which entry anchors which grid cell, and how far it spans.
//!
//! The map is keyed by working day and entry start time. Renderers walk the
//! slot columns of each day and ask [`Schedule::cell`] whether a column is the
//! anchor of an entry, covered by a multi-slot entry anchored earlier, or free.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::entry::TimetableEntry;
use crate::error::{Result, TimetableError};
use crate::settings::CalendarSettings;
use crate::slots::slot_span;
use crate::time::{DayOfWeek, TimeOfDay};

/// An entry placed on the grid together with the number of slots it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub entry: TimetableEntry,
    pub span: usize,
}

/// Classification of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell<'a> {
    /// The entry starts in this cell; render it merged over `span` columns.
    Anchor(&'a Placement),
    /// Covered by an entry anchored in an earlier column; render nothing.
    Covered,
    /// No entry; render an empty cell.
    Free,
}

/// Per-day, per-slot occupancy for one set of entries and settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    time_slots: Vec<TimeOfDay>,
    work_days: Vec<DayOfWeek>,
    schedule: BTreeMap<DayOfWeek, BTreeMap<TimeOfDay, Placement>>,
    displaced: Vec<TimetableEntry>,
}

#[derive(Clone, Copy, PartialEq)]
enum DuplicatePolicy {
    KeepFirst,
    Reject,
}

/// Build the occupancy map.
///
/// Only entries on working days whose start lies in
/// `[settings.start_time, settings.end_time)` are placed. When several entries
/// share a day and start time, the first in collection order is kept and the
/// rest are listed in [`Schedule::displaced`].
///
/// # Errors
/// Returns the slot generation error when `settings` has an invalid range.
pub fn build_schedule(entries: &[TimetableEntry], settings: &CalendarSettings) -> Result<Schedule> {
    build(entries, settings, DuplicatePolicy::KeepFirst)
}

/// Like [`build_schedule`], but fails with `TimetableError::DuplicateSlot`
/// instead of displacing entries that share a day and start time.
pub fn build_schedule_strict(
    entries: &[TimetableEntry],
    settings: &CalendarSettings,
) -> Result<Schedule> {
    build(entries, settings, DuplicatePolicy::Reject)
}

fn build(
    entries: &[TimetableEntry],
    settings: &CalendarSettings,
    policy: DuplicatePolicy,
) -> Result<Schedule> {
    let time_slots = settings.time_slots()?;

    // Span boundaries include the grid's closing time, so an entry ending
    // exactly at `end_time` spans to the last column.
    let mut boundaries = time_slots.clone();
    boundaries.push(settings.end_time);

    let mut work_days: Vec<DayOfWeek> = Vec::with_capacity(settings.work_days.len());
    let mut schedule = BTreeMap::new();
    let mut displaced = Vec::new();

    for &day in &settings.work_days {
        if work_days.contains(&day) {
            continue;
        }
        work_days.push(day);

        let mut placements: BTreeMap<TimeOfDay, Placement> = BTreeMap::new();
        for entry in entries.iter().filter(|e| {
            e.day == day && e.start_time >= settings.start_time && e.start_time < settings.end_time
        }) {
            if let Some(kept) = placements.get(&entry.start_time) {
                if policy == DuplicatePolicy::Reject {
                    return Err(TimetableError::DuplicateSlot {
                        day,
                        start: entry.start_time,
                    });
                }
                warn!(
                    day = %day,
                    start = %entry.start_time,
                    kept = %kept.entry.id,
                    dropped = %entry.id,
                    "two entries share a start slot; keeping the first"
                );
                displaced.push(entry.clone());
                continue;
            }

            let span = slot_span(entry.start_time, entry.end_time, &boundaries);
            placements.insert(
                entry.start_time,
                Placement {
                    entry: entry.clone(),
                    span,
                },
            );
        }
        schedule.insert(day, placements);
    }

    Ok(Schedule {
        time_slots,
        work_days,
        schedule,
        displaced,
    })
}

impl Schedule {
    /// Slot start labels, one per grid column.
    pub fn time_slots(&self) -> &[TimeOfDay] {
        &self.time_slots
    }

    /// Working days in display order.
    pub fn work_days(&self) -> &[DayOfWeek] {
        &self.work_days
    }

    /// Entries dropped because an earlier entry already anchored their slot.
    pub fn displaced(&self) -> &[TimetableEntry] {
        &self.displaced
    }

    /// Placements of one day keyed by start time, or `None` for a non-working day.
    pub fn day(&self, day: DayOfWeek) -> Option<&BTreeMap<TimeOfDay, Placement>> {
        self.schedule.get(&day)
    }

    pub fn placement(&self, day: DayOfWeek, start: TimeOfDay) -> Option<&Placement> {
        self.schedule.get(&day)?.get(&start)
    }

    /// Column index of the placement's anchor, if its start is a grid column.
    pub fn anchor_index(&self, placement: &Placement) -> Option<usize> {
        self.time_slots
            .iter()
            .position(|&slot| slot == placement.entry.start_time)
    }

    /// Classify the cell at (`day`, `slot_index`).
    ///
    /// Returns `None` for a non-working day or an index past the last column.
    pub fn cell(&self, day: DayOfWeek, slot_index: usize) -> Option<GridCell<'_>> {
        let placements = self.schedule.get(&day)?;
        let slot = self.time_slots.get(slot_index)?;

        if let Some(placement) = placements.get(slot) {
            return Some(GridCell::Anchor(placement));
        }

        let covered = placements.values().any(|placement| {
            self.anchor_index(placement)
                .is_some_and(|anchor| slot_index >= anchor && slot_index < anchor + placement.span)
        });

        Some(if covered {
            GridCell::Covered
        } else {
            GridCell::Free
        })
    }

    /// The cells a renderer emits for one day, with their column index.
    ///
    /// Covered cells are omitted because their anchor's span already includes
    /// them. Empty for a non-working day.
    pub fn row(&self, day: DayOfWeek) -> Vec<(usize, GridCell<'_>)> {
        (0..self.time_slots.len())
            .filter_map(|index| self.cell(day, index).map(|cell| (index, cell)))
            .filter(|(_, cell)| !matches!(cell, GridCell::Covered))
            .collect()
    }

    /// Number of entries placed on the grid.
    pub fn len(&self) -> usize {
        self.schedule.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
