//! Weekly calendar settings: visible hours, working days and slot granularity.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};
use crate::slots::{day_boundaries, generate_time_slots};
use crate::time::{DayOfWeek, TimeFormat, TimeOfDay};

/// Configuration of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSettings {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Working days in display order.
    pub work_days: Vec<DayOfWeek>,
    pub time_format: TimeFormat,
}

impl Default for CalendarSettings {
    /// 08:00 to 18:00, Monday to Friday, hourly slots.
    fn default() -> Self {
        Self {
            start_time: TimeOfDay::from_hm(8, 0).unwrap_or(TimeOfDay::MIDNIGHT),
            end_time: TimeOfDay::from_hm(18, 0).unwrap_or(TimeOfDay::MIDNIGHT),
            work_days: DayOfWeek::ALL[..5].to_vec(),
            time_format: TimeFormat::Hourly,
        }
    }
}

impl CalendarSettings {
    /// Check the settings before they are accepted.
    ///
    /// # Errors
    /// Returns `TimetableError::NoWorkDays` for an empty day list,
    /// `TimetableError::DuplicateWorkDay` when a day is listed twice,
    /// `TimetableError::InvalidRange` when `start_time >= end_time` and
    /// `TimetableError::InvalidTime` when a bound is off the slot grid.
    pub fn validate(&self) -> Result<()> {
        if self.work_days.is_empty() {
            return Err(TimetableError::NoWorkDays);
        }
        for (index, day) in self.work_days.iter().enumerate() {
            if self.work_days[..index].contains(day) {
                return Err(TimetableError::DuplicateWorkDay(*day));
            }
        }
        generate_time_slots(self.time_format, self.start_time, self.end_time).map(|_| ())
    }

    /// Slot start labels for these settings.
    pub fn time_slots(&self) -> Result<Vec<TimeOfDay>> {
        generate_time_slots(self.time_format, self.start_time, self.end_time)
    }

    pub fn is_working_day(&self, day: DayOfWeek) -> bool {
        self.work_days.contains(&day)
    }

    /// Whether `[start, end]` lies inside the visible hours.
    pub fn contains_range(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        start >= self.start_time && end <= self.end_time
    }

    /// Switch granularity, snapping both bounds onto the new slot grid.
    ///
    /// Each bound moves to the first whole-day boundary at or after its current
    /// value. A start with no such boundary falls back to midnight and an end
    /// falls back to the last boundary of the day. If snapping collapses the
    /// range, the end is pushed one step past the start.
    pub fn with_time_format(&self, time_format: TimeFormat) -> Self {
        let boundaries = day_boundaries(time_format);
        let first = boundaries[0];
        let last = boundaries[boundaries.len() - 1];

        let snap = |value: TimeOfDay| boundaries.iter().copied().find(|&b| b >= value);
        let mut start_time = snap(self.start_time).unwrap_or(first);
        let mut end_time = snap(self.end_time).unwrap_or(last);

        if end_time <= start_time {
            let index = boundaries
                .iter()
                .position(|&b| b == start_time)
                .unwrap_or(0);
            match boundaries.get(index + 1) {
                Some(&next) => end_time = next,
                None => {
                    start_time = boundaries[index - 1];
                    end_time = boundaries[index];
                }
            }
        }

        Self {
            start_time,
            end_time,
            work_days: self.work_days.clone(),
            time_format,
        }
    }
}
