//! # timegrid
//!
//! Weekly timetable model for a browser-based timetable editor.
//!
//! Turns calendar settings into an ordered list of time slots, maps timetable
//! entries onto those slots (including entries spanning several slots), and
//! detects overlapping entries. Every view and every export goes through the
//! same functions, so the grid the user edits and the grid that gets exported
//! are always laid out identically.
//!
//! ## Modules
//!
//! - [`time`] — `TimeOfDay`, `TimeFormat`, `DayOfWeek`
//! - [`slots`] — Slot generation, slot-range labels, span computation
//! - [`schedule`] — Per-day occupancy map with anchor / covered / free cells
//! - [`conflict`] — Half-open overlap detection
//! - [`settings`] — Calendar settings and their validation
//! - [`entry`] — Timetable entries and time ranges
//! - [`store`] — In-memory entry collection and settings
//! - [`export`] — Finalized grid for PDF / spreadsheet writers
//! - [`document`] — JSON snapshot of a session
//! - [`error`] — Error types

pub mod conflict;
pub mod document;
pub mod entry;
pub mod error;
pub mod export;
pub mod schedule;
pub mod settings;
pub mod slots;
pub mod store;
pub mod time;

pub use conflict::{find_conflicts, find_overlaps, has_overlap, Conflict, Overlap};
pub use document::TimetableDocument;
pub use entry::{DayTimeSlot, EntryDraft, TimeSlot, TimetableEntry};
pub use error::TimetableError;
pub use export::{ExportCell, ExportGrid, PageLayout, Spreadsheet};
pub use schedule::{build_schedule, build_schedule_strict, GridCell, Placement, Schedule};
pub use settings::CalendarSettings;
pub use slots::{format_slot_range, generate_time_slots, slot_span};
pub use store::{Admission, OverlapPolicy, TimetableStore};
pub use time::{DayOfWeek, TimeFormat, TimeOfDay};
