//! JSON snapshot of a timetable session: settings plus entries.
//!
//! ```json
//! {
//!   "settings": { "startTime": "08:00", "endTime": "18:00",
//!                 "workDays": ["Monday"], "timeFormat": "hourly" },
//!   "entries": [ { "id": "1", "subject": "Maths", "location": "A1",
//!                  "lecturer": "Dr. Rao", "day": "Monday",
//!                  "startTime": "09:00", "endTime": "11:00" } ]
//! }
//! ```
//!
//! Both fields are optional; missing settings fall back to
//! [`CalendarSettings::default`].

use serde::{Deserialize, Serialize};

use crate::entry::TimetableEntry;
use crate::error::Result;
use crate::settings::CalendarSettings;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableDocument {
    #[serde(default)]
    pub settings: CalendarSettings,
    #[serde(default)]
    pub entries: Vec<TimetableEntry>,
}

impl TimetableDocument {
    /// Parse a document. Settings are not validated here; see
    /// [`crate::TimetableStore::from_document`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
