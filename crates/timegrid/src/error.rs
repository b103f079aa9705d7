//! Error types for timegrid operations.

use thiserror::Error;

use crate::time::{DayOfWeek, TimeOfDay};

/// Validation failures surfaced synchronously to the caller.
///
/// None of these are fatal: an operation that returns one of them leaves the
/// store exactly as it was.
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Invalid range: start {start} must be before end {end}")]
    InvalidRange { start: TimeOfDay, end: TimeOfDay },

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Duplicate slot: more than one entry starts on {day} at {start}")]
    DuplicateSlot { day: DayOfWeek, start: TimeOfDay },

    #[error("At least one working day must be selected")]
    NoWorkDays,

    #[error("Working day listed twice: {0}")]
    DuplicateWorkDay(DayOfWeek),

    #[error("Time slot {start}-{end} is outside working hours {open}-{close}")]
    OutsideWorkingHours {
        start: TimeOfDay,
        end: TimeOfDay,
        open: TimeOfDay,
        close: TimeOfDay,
    },

    #[error("Unknown entry: {0}")]
    UnknownEntry(String),

    #[error("Entry id used more than once: {0}")]
    DuplicateEntryId(String),

    #[error("Timetable document error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Spreadsheet write error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TimetableError>;
