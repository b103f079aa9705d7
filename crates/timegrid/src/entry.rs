//! Timetable entries and time ranges.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};
use crate::time::{DayOfWeek, TimeOfDay};

/// A time range within one day. `start_time` is strictly before `end_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl TimeSlot {
    /// # Errors
    /// Returns `TimetableError::InvalidRange` if `start_time >= end_time`.
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Result<Self> {
        if start_time >= end_time {
            return Err(TimetableError::InvalidRange {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            start_time,
            end_time,
        })
    }
}

/// A time range pinned to a weekday; the shape of an overlap candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTimeSlot {
    pub day: DayOfWeek,
    #[serde(flatten)]
    pub slot: TimeSlot,
}

impl DayTimeSlot {
    pub fn new(day: DayOfWeek, slot: TimeSlot) -> Self {
        Self { day, slot }
    }
}

/// One scheduled lesson. Entries are replaced wholesale on edit; `id` is the
/// only identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: String,
    pub subject: String,
    pub location: String,
    pub lecturer: String,
    pub day: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl TimetableEntry {
    pub fn from_draft(id: impl Into<String>, draft: EntryDraft) -> Self {
        Self {
            id: id.into(),
            subject: draft.subject,
            location: draft.location,
            lecturer: draft.lecturer,
            day: draft.day,
            start_time: draft.start_time,
            end_time: draft.end_time,
        }
    }

    pub fn day_slot(&self) -> DayTimeSlot {
        DayTimeSlot {
            day: self.day,
            slot: TimeSlot {
                start_time: self.start_time,
                end_time: self.end_time,
            },
        }
    }
}

/// Form data for a new entry, before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub subject: String,
    pub location: String,
    pub lecturer: String,
    pub day: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl EntryDraft {
    pub fn day_slot(&self) -> DayTimeSlot {
        DayTimeSlot {
            day: self.day,
            slot: TimeSlot {
                start_time: self.start_time,
                end_time: self.end_time,
            },
        }
    }
}

impl From<TimetableEntry> for EntryDraft {
    fn from(entry: TimetableEntry) -> Self {
        Self {
            subject: entry.subject,
            location: entry.location,
            lecturer: entry.lecturer,
            day: entry.day,
            start_time: entry.start_time,
            end_time: entry.end_time,
        }
    }
}
