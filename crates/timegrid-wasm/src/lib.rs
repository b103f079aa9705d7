//! WASM bindings for timegrid.
//!
//! Exposes slot generation, the schedule grid, overlap checks and the export
//! grid to the browser UI via `wasm-bindgen`. All complex types are passed as
//! JSON strings using the same camelCase shapes as the UI's own state
//! (`startTime`, `workDays`, `timeFormat`, ...).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timegrid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/timegrid_wasm.wasm
//! ```

use serde::{Deserialize, Serialize};
use timegrid::{
    CalendarSettings, DayTimeSlot, ExportGrid, Spreadsheet, TimeFormat, TimeOfDay, TimetableEntry,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OverlapDto {
    entry: TimetableEntry,
    overlap_minutes: i64,
}

/// Overlap candidate as sent by the entry form.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateInput {
    #[serde(flatten)]
    slot: DayTimeSlot,
    exclude_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers: parse JSON arguments and stringify results
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_time(s: &str) -> Result<TimeOfDay, JsValue> {
    s.parse().map_err(js_err)
}

fn parse_format(s: &str) -> Result<TimeFormat, JsValue> {
    s.parse().map_err(|e: String| JsValue::from_str(&e))
}

fn parse_json<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn parse_slots_json(json: &str) -> Result<Vec<TimeOfDay>, JsValue> {
    parse_json(json, "time slots")
}

fn parse_settings_json(json: &str) -> Result<CalendarSettings, JsValue> {
    let settings: CalendarSettings = parse_json(json, "settings")?;
    settings.validate().map_err(js_err)?;
    Ok(settings)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate slot start labels. Returns a JSON array of `"HH:MM"` strings.
///
/// # Arguments
/// - `time_format` -- `"hourly"` or `"half-hour"`
/// - `start_time`, `end_time` -- `"HH:MM"` bounds on the chosen granularity
#[wasm_bindgen(js_name = "generateTimeSlots")]
pub fn generate_time_slots(
    time_format: &str,
    start_time: &str,
    end_time: &str,
) -> Result<String, JsValue> {
    let slots = timegrid::generate_time_slots(
        parse_format(time_format)?,
        parse_time(start_time)?,
        parse_time(end_time)?,
    )
    .map_err(js_err)?;
    to_json(&slots)
}

/// Render the `"HH:MM-HH:MM"` header label of one slot.
///
/// `all_slots_json` is the array returned by `generateTimeSlots`.
#[wasm_bindgen(js_name = "formatSlotRange")]
pub fn format_slot_range(
    slot: &str,
    time_format: &str,
    all_slots_json: &str,
) -> Result<String, JsValue> {
    let all_slots = parse_slots_json(all_slots_json)?;
    Ok(timegrid::format_slot_range(
        parse_time(slot)?,
        parse_format(time_format)?,
        &all_slots,
    ))
}

/// Number of slot columns an entry from `entry_start` to `entry_end` covers.
#[wasm_bindgen(js_name = "slotSpan")]
pub fn slot_span(entry_start: &str, entry_end: &str, all_slots_json: &str) -> Result<u32, JsValue> {
    let all_slots = parse_slots_json(all_slots_json)?;
    let span = timegrid::slot_span(parse_time(entry_start)?, parse_time(entry_end)?, &all_slots);
    Ok(u32::try_from(span).unwrap_or(u32::MAX))
}

/// Build the occupancy map.
///
/// Returns `{timeSlots, workDays, schedule: {day: {start: {entry, span}}}, displaced}`.
#[wasm_bindgen(js_name = "buildSchedule")]
pub fn build_schedule(entries_json: &str, settings_json: &str) -> Result<String, JsValue> {
    let entries: Vec<TimetableEntry> = parse_json(entries_json, "entries")?;
    let settings = parse_settings_json(settings_json)?;
    let schedule = timegrid::build_schedule(&entries, &settings).map_err(js_err)?;
    to_json(&schedule)
}

/// Whether a candidate `{day, startTime, endTime, excludeId?}` overlaps any entry.
#[wasm_bindgen(js_name = "hasOverlap")]
pub fn has_overlap(candidate_json: &str, entries_json: &str) -> Result<bool, JsValue> {
    let candidate: CandidateInput = parse_json(candidate_json, "candidate")?;
    let entries: Vec<TimetableEntry> = parse_json(entries_json, "entries")?;
    Ok(timegrid::has_overlap(
        &candidate.slot,
        &entries,
        candidate.exclude_id.as_deref(),
    ))
}

/// Entries a candidate overlaps, as `[{entry, overlapMinutes}]`, for the
/// confirmation prompt.
#[wasm_bindgen(js_name = "findOverlaps")]
pub fn find_overlaps(candidate_json: &str, entries_json: &str) -> Result<String, JsValue> {
    let candidate: CandidateInput = parse_json(candidate_json, "candidate")?;
    let entries: Vec<TimetableEntry> = parse_json(entries_json, "entries")?;

    let dtos: Vec<OverlapDto> =
        timegrid::find_overlaps(&candidate.slot, &entries, candidate.exclude_id.as_deref())
            .into_iter()
            .map(|o| OverlapDto {
                entry: o.entry,
                overlap_minutes: o.overlap_minutes,
            })
            .collect();

    to_json(&dtos)
}

/// Finalized grid for the PDF writer: `{grid, layout}` where `layout` is the
/// A4 landscape geometry in millimetres.
#[wasm_bindgen(js_name = "exportGrid")]
pub fn export_grid(entries_json: &str, settings_json: &str) -> Result<String, JsValue> {
    #[derive(Serialize)]
    struct ExportDto {
        grid: ExportGrid,
        layout: timegrid::PageLayout,
    }

    let entries: Vec<TimetableEntry> = parse_json(entries_json, "entries")?;
    let settings = parse_settings_json(settings_json)?;
    let grid = ExportGrid::build(&entries, &settings).map_err(js_err)?;
    let layout = timegrid::PageLayout::a4_landscape(&grid);
    to_json(&ExportDto { grid, layout })
}

/// `{sheetName, rows}` for the spreadsheet writer; `rows` is `string[][]`,
/// header first.
#[wasm_bindgen(js_name = "spreadsheetRows")]
pub fn spreadsheet_rows_json(entries_json: &str, settings_json: &str) -> Result<String, JsValue> {
    let entries: Vec<TimetableEntry> = parse_json(entries_json, "entries")?;
    let settings = parse_settings_json(settings_json)?;
    let grid = ExportGrid::build(&entries, &settings).map_err(js_err)?;
    to_json(&Spreadsheet::from_grid(&grid))
}

/// Validate settings before the settings dialog saves them.
///
/// Returns nothing on success and throws the validation message otherwise.
#[wasm_bindgen(js_name = "validateSettings")]
pub fn validate_settings(settings_json: &str) -> Result<(), JsValue> {
    parse_settings_json(settings_json).map(|_| ())
}

/// Switch granularity, snapping the bounds onto the new grid. Returns the
/// adjusted settings JSON.
#[wasm_bindgen(js_name = "changeTimeFormat")]
pub fn change_time_format(settings_json: &str, time_format: &str) -> Result<String, JsValue> {
    let settings: CalendarSettings = parse_json(settings_json, "settings")?;
    to_json(&settings.with_time_format(parse_format(time_format)?))
}

/// Fresh id for an entry created in the browser.
#[wasm_bindgen(js_name = "newEntryId")]
pub fn new_entry_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
