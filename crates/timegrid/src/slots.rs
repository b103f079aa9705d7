//! Slot generation, slot-range labels and span computation.
//!
//! Every grid view and every export derives its columns from
//! [`generate_time_slots`]. Slots follow the half-open rule: each produced
//! start `t` satisfies `start <= t < end`, and the last slot implicitly ends at
//! `end`.

use crate::error::{Result, TimetableError};
use crate::time::{TimeFormat, TimeOfDay};

/// Generate the ordered slot start labels between `start_time` and `end_time`.
///
/// # Errors
/// Returns `TimetableError::InvalidRange` if `start_time >= end_time`.
/// Returns `TimetableError::InvalidTime` if either bound is not on a slot
/// boundary for `time_format`.
pub fn generate_time_slots(
    time_format: TimeFormat,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
) -> Result<Vec<TimeOfDay>> {
    if start_time >= end_time {
        return Err(TimetableError::InvalidRange {
            start: start_time,
            end: end_time,
        });
    }
    for bound in [start_time, end_time] {
        if !time_format.is_aligned(bound) {
            return Err(TimetableError::InvalidTime(format!(
                "{} is not on a {} slot boundary",
                bound, time_format
            )));
        }
    }

    let step = time_format.step_minutes();
    let mut slots = Vec::new();
    let mut cursor = Some(start_time);
    while let Some(slot) = cursor {
        if slot >= end_time {
            break;
        }
        slots.push(slot);
        cursor = slot.checked_add_minutes(step);
    }

    Ok(slots)
}

/// Every slot boundary of a whole day, `00:00` up to the last step before
/// midnight. Used to snap settings bounds when the granularity changes.
pub fn day_boundaries(time_format: TimeFormat) -> Vec<TimeOfDay> {
    let step = time_format.step_minutes();
    std::iter::successors(Some(TimeOfDay::MIDNIGHT), |t| t.checked_add_minutes(step)).collect()
}

/// Render the `HH:MM-HH:MM` label of the slot starting at `slot`.
///
/// The label ends at the next element of `all_slots`. For the last slot (or a
/// slot missing from `all_slots`) it ends one granularity step later, which for
/// a generated sequence is exactly the configured end time. An end at or past
/// midnight is written as `24:00` and beyond.
pub fn format_slot_range(slot: TimeOfDay, time_format: TimeFormat, all_slots: &[TimeOfDay]) -> String {
    let next = all_slots
        .iter()
        .position(|&s| s == slot)
        .and_then(|index| all_slots.get(index + 1));

    let end = match next {
        Some(next) => next.to_string(),
        None => {
            let minutes = slot.minutes_since_midnight() + time_format.step_minutes();
            format!("{:02}:{:02}", minutes / 60, minutes % 60)
        }
    };

    format!("{}-{}", slot, end)
}

/// Number of consecutive slots covered by an entry running from `entry_start`
/// to `entry_end`.
///
/// The span is the index distance between the two boundaries in `all_slots`,
/// never less than 1. When either boundary is missing from `all_slots` the span
/// falls back to 1 instead of failing, so entries created under a different
/// granularity still render.
pub fn slot_span(entry_start: TimeOfDay, entry_end: TimeOfDay, all_slots: &[TimeOfDay]) -> usize {
    let start_index = all_slots.iter().position(|&s| s == entry_start);
    let end_index = all_slots.iter().position(|&s| s == entry_end);

    match (start_index, end_index) {
        (Some(start), Some(end)) => end.saturating_sub(start).max(1),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn day_boundaries_cover_whole_day() {
        let hourly = day_boundaries(TimeFormat::Hourly);
        assert_eq!(hourly.len(), 24);
        assert_eq!(hourly.last().unwrap().to_string(), "23:00");

        let half = day_boundaries(TimeFormat::HalfHour);
        assert_eq!(half.len(), 48);
        assert_eq!(half.last().unwrap().to_string(), "23:30");
    }

    #[test]
    fn late_last_slot_label_runs_to_midnight() {
        let slots = generate_time_slots(TimeFormat::Hourly, t("22:00"), t("23:00")).unwrap();
        assert_eq!(
            format_slot_range(t("22:00"), TimeFormat::Hourly, &slots),
            "22:00-23:00"
        );
        assert_eq!(
            format_slot_range(t("23:00"), TimeFormat::Hourly, &[t("23:00")]),
            "23:00-24:00"
        );
    }
}
