//! Wall-clock primitives: time of day, slot granularity and weekday names.
//!
//! `TimeOfDay` is always rendered as zero-padded `HH:MM`, so its `Ord` agrees
//! with the lexicographic order of the rendered strings.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// A minute-precision wall-clock time within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Midnight, the first boundary of every day.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(NaiveTime::MIN);

    /// Build from hour and minute, returning `None` outside `00:00`..=`23:59`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Add `minutes`, returning `None` if the result would reach or pass
    /// midnight of the next day.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        let (next, wrapped) = self
            .0
            .overflowing_add_signed(Duration::minutes(i64::from(minutes)));
        (wrapped == 0).then_some(TimeOfDay(next))
    }

    /// Signed number of minutes from `self` to `later`.
    pub fn minutes_until(self, later: TimeOfDay) -> i64 {
        (later.0 - self.0).num_minutes()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for TimeOfDay {
    type Err = TimetableError;

    /// Parse strictly `HH:MM`. Unpadded forms such as `8:00` are rejected so
    /// that every accepted value round-trips to the same string.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(TimetableError::InvalidTime(format!(
                "'{}' is not an HH:MM time",
                s
            )));
        }

        let digit = |i: usize| u32::from(bytes[i] - b'0');
        let hour = digit(0) * 10 + digit(1);
        let minute = digit(3) * 10 + digit(4);

        TimeOfDay::from_hm(hour, minute)
            .ok_or_else(|| TimetableError::InvalidTime(format!("'{}' is out of range", s)))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimetableError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Slot granularity of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFormat {
    /// One slot per hour.
    #[default]
    Hourly,
    /// Two slots per hour, on `:00` and `:30`.
    HalfHour,
}

impl TimeFormat {
    /// Width of one slot in minutes.
    pub fn step_minutes(self) -> u32 {
        match self {
            TimeFormat::Hourly => 60,
            TimeFormat::HalfHour => 30,
        }
    }

    /// Whether `time` lies on a slot boundary for this granularity.
    pub fn is_aligned(self, time: TimeOfDay) -> bool {
        time.minute() % self.step_minutes() == 0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeFormat::Hourly => "hourly",
            TimeFormat::HalfHour => "half-hour",
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(TimeFormat::Hourly),
            "half-hour" => Ok(TimeFormat::HalfHour),
            other => Err(format!(
                "unknown time format '{}' (expected 'hourly' or 'half-hour')",
                other
            )),
        }
    }
}

/// One of the seven fixed weekday names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days in week order, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.name() == s)
            .ok_or_else(|| format!("unknown day of week '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_times_only() {
        assert_eq!("08:00".parse::<TimeOfDay>().unwrap().to_string(), "08:00");
        assert!("8:00".parse::<TimeOfDay>().is_err());
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("12-30".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn ordering_matches_string_ordering() {
        let a: TimeOfDay = "09:30".parse().unwrap();
        let b: TimeOfDay = "10:00".parse().unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn checked_add_stops_at_midnight() {
        let late = TimeOfDay::from_hm(23, 30).unwrap();
        assert_eq!(late.checked_add_minutes(29).unwrap().to_string(), "23:59");
        assert!(late.checked_add_minutes(30).is_none());
    }

    #[test]
    fn time_format_serde_names() {
        assert_eq!(
            serde_json::to_string(&TimeFormat::HalfHour).unwrap(),
            "\"half-hour\""
        );
        let parsed: TimeFormat = serde_json::from_str("\"hourly\"").unwrap();
        assert_eq!(parsed, TimeFormat::Hourly);
    }
}
