//! Renderer-neutral export grid for the PDF and spreadsheet writers.
//!
//! The document writers themselves live outside this crate. They receive an
//! [`ExportGrid`]: header labels, one row per working day, and per slot either
//! an anchored entry (with span and colour), a covered cell or a free cell.
//! [`PageLayout`] gives the A4 landscape geometry for the PDF writer, and
//! [`write_csv`] produces the single-sheet spreadsheet form directly.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::entry::TimetableEntry;
use crate::error::Result;
use crate::schedule::{build_schedule, GridCell, Schedule};
use crate::settings::CalendarSettings;
use crate::slots::format_slot_range;
use crate::time::{DayOfWeek, TimeFormat, TimeOfDay};

pub const TITLE: &str = "Weekly Timetable Schedule";
pub const SHEET_NAME: &str = "Weekly Schedule";

/// RGB colours used to draw one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotColor {
    pub background: [u8; 3],
    pub border: [u8; 3],
    pub text: [u8; 3],
}

/// Blue, red, green, yellow, purple.
pub const PALETTE: [SlotColor; 5] = [
    SlotColor {
        background: [219, 234, 254],
        border: [191, 219, 254],
        text: [37, 99, 235],
    },
    SlotColor {
        background: [254, 226, 226],
        border: [254, 202, 202],
        text: [220, 38, 38],
    },
    SlotColor {
        background: [220, 252, 231],
        border: [187, 247, 208],
        text: [22, 163, 74],
    },
    SlotColor {
        background: [254, 243, 199],
        border: [253, 230, 138],
        text: [217, 119, 6],
    },
    SlotColor {
        background: [237, 233, 254],
        border: [221, 214, 254],
        text: [109, 40, 217],
    },
];

/// Assigns palette colours to subjects in first-seen order, cycling when the
/// palette runs out.
#[derive(Debug, Clone, Default)]
pub struct SubjectPalette {
    assigned: Vec<(String, SlotColor)>,
}

impl SubjectPalette {
    pub fn color_for(&mut self, subject: &str) -> SlotColor {
        if let Some((_, color)) = self.assigned.iter().find(|(s, _)| s == subject) {
            return *color;
        }
        let color = PALETTE[self.assigned.len() % PALETTE.len()];
        self.assigned.push((subject.to_string(), color));
        color
    }

    /// Subjects with their colours, in assignment order.
    pub fn assignments(&self) -> &[(String, SlotColor)] {
        &self.assigned
    }
}

/// One grid cell as handed to a document writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportCell {
    Entry {
        entry: TimetableEntry,
        span: usize,
        color: SlotColor,
    },
    Covered,
    Free,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub day: DayOfWeek,
    pub cells: Vec<ExportCell>,
}

/// The finalized grid consumed by the PDF and spreadsheet writers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportGrid {
    pub title: String,
    pub time_slots: Vec<TimeOfDay>,
    /// `HH:MM-HH:MM` label of every slot column.
    pub headers: Vec<String>,
    pub rows: Vec<ExportRow>,
}

impl ExportGrid {
    /// Build the grid for `entries` displayed under `settings`.
    pub fn build(entries: &[TimetableEntry], settings: &CalendarSettings) -> Result<Self> {
        let schedule = build_schedule(entries, settings)?;
        Ok(Self::from_schedule(&schedule, settings.time_format))
    }

    /// Build the grid from an existing occupancy map.
    ///
    /// Colours are assigned walking rows top to bottom and cells left to right.
    pub fn from_schedule(schedule: &Schedule, time_format: TimeFormat) -> Self {
        let time_slots = schedule.time_slots().to_vec();
        let headers = time_slots
            .iter()
            .map(|&slot| format_slot_range(slot, time_format, &time_slots))
            .collect();

        let mut palette = SubjectPalette::default();
        let rows = schedule
            .work_days()
            .iter()
            .map(|&day| ExportRow {
                day,
                cells: (0..time_slots.len())
                    .map(|index| match schedule.cell(day, index) {
                        Some(GridCell::Anchor(placement)) => ExportCell::Entry {
                            entry: placement.entry.clone(),
                            span: placement.span,
                            color: palette.color_for(&placement.entry.subject),
                        },
                        Some(GridCell::Covered) => ExportCell::Covered,
                        Some(GridCell::Free) | None => ExportCell::Free,
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: TITLE.to_string(),
            time_slots,
            headers,
            rows,
        }
    }
}

/// An axis-aligned rectangle in millimetres, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Page geometry for drawing an [`ExportGrid`] on a single page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    /// Height of the coloured title band at the top of the page.
    pub title_band_height: f64,
    pub day_column_width: f64,
    pub time_column_width: f64,
    pub row_height: f64,
    /// Top edge of the header row.
    pub grid_top: f64,
    /// Header row plus one row per working day.
    pub row_count: usize,
}

impl PageLayout {
    const A4_LONG_MM: f64 = 297.0;
    const A4_SHORT_MM: f64 = 210.0;
    const MARGIN_MM: f64 = 10.0;
    const TITLE_BAND_MM: f64 = 20.0;
    const DAY_COLUMN_MM: f64 = 25.0;
    const GRID_OFFSET_MM: f64 = 15.0;
    const RESERVED_HEIGHT_MM: f64 = 25.0;

    /// A4 landscape: day column on the left, slot columns sharing the rest of
    /// the usable width, header row plus working-day rows sharing the height.
    pub fn a4_landscape(grid: &ExportGrid) -> Self {
        let usable_width = Self::A4_LONG_MM - 2.0 * Self::MARGIN_MM;
        let usable_height = Self::A4_SHORT_MM - 2.0 * Self::MARGIN_MM;
        let columns = grid.time_slots.len().max(1) as f64;
        let row_count = grid.rows.len() + 1;

        Self {
            page_width: Self::A4_LONG_MM,
            page_height: Self::A4_SHORT_MM,
            margin: Self::MARGIN_MM,
            title_band_height: Self::TITLE_BAND_MM,
            day_column_width: Self::DAY_COLUMN_MM,
            time_column_width: (usable_width - Self::DAY_COLUMN_MM) / columns,
            row_height: (usable_height - Self::RESERVED_HEIGHT_MM) / row_count as f64,
            grid_top: Self::MARGIN_MM + Self::GRID_OFFSET_MM,
            row_count,
        }
    }

    pub fn usable_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    /// Bottom edge of the last working-day row.
    pub fn grid_bottom(&self) -> f64 {
        self.grid_top + self.row_height * self.row_count as f64
    }

    /// Header cell of slot column `column`.
    pub fn header_rect(&self, column: usize) -> Rect {
        Rect {
            x: self.column_x(column),
            y: self.grid_top,
            width: self.time_column_width,
            height: self.row_height,
        }
    }

    /// Day label cell of working-day row `row` (0-based, header excluded).
    pub fn day_rect(&self, row: usize) -> Rect {
        Rect {
            x: self.margin,
            y: self.row_y(row),
            width: self.day_column_width,
            height: self.row_height,
        }
    }

    /// Entry cell at (`row`, `column`) merged across `span` columns.
    pub fn cell_rect(&self, row: usize, column: usize, span: usize) -> Rect {
        Rect {
            x: self.column_x(column),
            y: self.row_y(row),
            width: self.time_column_width * span as f64,
            height: self.row_height,
        }
    }

    fn column_x(&self, column: usize) -> f64 {
        self.margin + self.day_column_width + self.time_column_width * column as f64
    }

    fn row_y(&self, row: usize) -> f64 {
        self.grid_top + self.row_height * (row + 1) as f64
    }
}

/// Text of a spreadsheet cell holding an entry.
pub fn cell_text(entry: &TimetableEntry) -> String {
    [
        entry.subject.clone(),
        format!("Location: {}", entry.location),
        format!("Lecturer: {}", entry.lecturer),
    ]
    .join("\n")
}

/// One sheet: a `Day` + slot-label header row, then one row per working day.
/// Covered and free cells are empty strings.
pub fn spreadsheet_rows(grid: &ExportGrid) -> Vec<Vec<String>> {
    let header = std::iter::once("Day".to_string())
        .chain(grid.headers.iter().cloned())
        .collect();

    let body = grid.rows.iter().map(|row| {
        std::iter::once(row.day.to_string())
            .chain(row.cells.iter().map(|cell| match cell {
                ExportCell::Entry { entry, .. } => cell_text(entry),
                ExportCell::Covered | ExportCell::Free => String::new(),
            }))
            .collect()
    });

    std::iter::once(header).chain(body).collect()
}

/// The single-sheet workbook handed to the spreadsheet writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    pub sheet_name: String,
    pub rows: Vec<Vec<String>>,
}

impl Spreadsheet {
    pub fn from_grid(grid: &ExportGrid) -> Self {
        Self {
            sheet_name: SHEET_NAME.to_string(),
            rows: spreadsheet_rows(grid),
        }
    }
}

/// Write the spreadsheet rows as CSV.
pub fn write_csv<W: Write>(grid: &ExportGrid, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in spreadsheet_rows(grid) {
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Target document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// `weekly-schedule-YYYY-MM-DD.<ext>`
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "weekly-schedule-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}
