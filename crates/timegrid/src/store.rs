//! In-memory timetable state: the entry collection and the calendar settings.
//!
//! The store is the single owner of session state. Every mutating operation
//! validates first and leaves the store untouched when it returns an error or
//! asks for confirmation.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::conflict::{find_overlaps, Overlap};
use crate::document::TimetableDocument;
use crate::entry::{EntryDraft, TimeSlot, TimetableEntry};
use crate::error::{Result, TimetableError};
use crate::schedule::{build_schedule, Schedule};
use crate::settings::CalendarSettings;

/// What to do when a new or edited entry overlaps existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Report overlaps back to the caller without applying the change.
    #[default]
    Confirm,
    /// Apply the change even if it overlaps.
    Allow,
}

/// Result of a create or update that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// The change was applied; carries the stored entry.
    Accepted(TimetableEntry),
    /// The change overlaps these entries and was not applied. Retry with
    /// [`OverlapPolicy::Allow`] once the user confirms.
    NeedsConfirmation(Vec<Overlap>),
}

/// Entries in insertion order plus the settings they are displayed against.
#[derive(Debug, Clone, Default)]
pub struct TimetableStore {
    entries: Vec<TimetableEntry>,
    settings: CalendarSettings,
}

impl TimetableStore {
    /// # Errors
    /// Returns the settings validation error if `settings` is rejected.
    pub fn new(settings: CalendarSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            entries: Vec::new(),
            settings,
        })
    }

    /// Load a document.
    ///
    /// Settings are validated. Each entry must have `start_time < end_time`
    /// and an id no other entry uses; working days and working hours are not
    /// enforced, since they only decide what the schedule shows.
    ///
    /// # Errors
    /// Returns `TimetableError::InvalidRange` or
    /// `TimetableError::DuplicateEntryId` for the first offending entry.
    pub fn from_document(document: TimetableDocument) -> Result<Self> {
        let mut store = Self::new(document.settings)?;
        let mut seen = HashSet::with_capacity(document.entries.len());
        for entry in &document.entries {
            TimeSlot::new(entry.start_time, entry.end_time)?;
            if !seen.insert(entry.id.as_str()) {
                return Err(TimetableError::DuplicateEntryId(entry.id.clone()));
            }
        }
        store.entries = document.entries;
        Ok(store)
    }

    pub fn to_document(&self) -> TimetableDocument {
        TimetableDocument {
            settings: self.settings.clone(),
            entries: self.entries.clone(),
        }
    }

    pub fn entries(&self) -> &[TimetableEntry] {
        &self.entries
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    pub fn get(&self, id: &str) -> Option<&TimetableEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Replace the settings after validating them.
    ///
    /// Entries are kept even if they now fall outside the visible hours or on
    /// a non-working day; the schedule simply stops showing them.
    pub fn set_settings(&mut self, settings: CalendarSettings) -> Result<()> {
        if let Err(err) = settings.validate() {
            debug!(%err, "rejected calendar settings");
            return Err(err);
        }
        debug!(
            start = %settings.start_time,
            end = %settings.end_time,
            format = %settings.time_format,
            days = settings.work_days.len(),
            "calendar settings updated"
        );
        self.settings = settings;
        Ok(())
    }

    /// Create an entry from form data and assign it a fresh id.
    ///
    /// # Errors
    /// Returns `TimetableError::InvalidRange`, `TimetableError::InvalidTime` or
    /// `TimetableError::OutsideWorkingHours` when the draft's times are rejected.
    pub fn create(&mut self, draft: EntryDraft, policy: OverlapPolicy) -> Result<Admission> {
        self.check_times(&draft)?;

        let overlaps = find_overlaps(&draft.day_slot(), &self.entries, None);
        if policy == OverlapPolicy::Confirm && !overlaps.is_empty() {
            debug!(count = overlaps.len(), "new entry overlaps existing entries");
            return Ok(Admission::NeedsConfirmation(overlaps));
        }

        let entry = TimetableEntry::from_draft(Uuid::new_v4().to_string(), draft);
        debug!(id = %entry.id, day = %entry.day, start = %entry.start_time, "entry created");
        self.entries.push(entry.clone());
        Ok(Admission::Accepted(entry))
    }

    /// Replace the stored entry that has `entry.id`, keeping its position.
    ///
    /// The entry's own previous record is ignored by overlap detection.
    ///
    /// # Errors
    /// Returns `TimetableError::UnknownEntry` if no entry has that id, or a
    /// time validation error as for [`TimetableStore::create`].
    pub fn update(&mut self, entry: TimetableEntry, policy: OverlapPolicy) -> Result<Admission> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == entry.id)
            .ok_or_else(|| TimetableError::UnknownEntry(entry.id.clone()))?;

        let draft = EntryDraft::from(entry.clone());
        self.check_times(&draft)?;

        let overlaps = find_overlaps(&draft.day_slot(), &self.entries, Some(&entry.id));
        if policy == OverlapPolicy::Confirm && !overlaps.is_empty() {
            debug!(id = %entry.id, count = overlaps.len(), "edited entry overlaps existing entries");
            return Ok(Admission::NeedsConfirmation(overlaps));
        }

        debug!(id = %entry.id, "entry updated");
        self.entries[position] = entry.clone();
        Ok(Admission::Accepted(entry))
    }

    /// Remove the entry with `id` and return it.
    pub fn delete(&mut self, id: &str) -> Result<TimetableEntry> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| TimetableError::UnknownEntry(id.to_string()))?;
        debug!(id, "entry deleted");
        Ok(self.entries.remove(position))
    }

    /// Occupancy map of the current entries under the current settings.
    pub fn schedule(&self) -> Result<Schedule> {
        build_schedule(&self.entries, &self.settings)
    }

    fn check_times(&self, draft: &EntryDraft) -> Result<()> {
        let (start, end) = (draft.start_time, draft.end_time);
        let format = self.settings.time_format;

        let result = if start >= end {
            Err(TimetableError::InvalidRange { start, end })
        } else if let Some(off_grid) = [start, end].into_iter().find(|&t| !format.is_aligned(t)) {
            Err(TimetableError::InvalidTime(format!(
                "{} is not on a {} slot boundary",
                off_grid, format
            )))
        } else if !self.settings.contains_range(start, end) {
            Err(TimetableError::OutsideWorkingHours {
                start,
                end,
                open: self.settings.start_time,
                close: self.settings.end_time,
            })
        } else {
            Ok(())
        };

        if let Err(err) = &result {
            debug!(%err, "rejected entry times");
        }
        result
    }
}
