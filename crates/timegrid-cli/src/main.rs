//! `timetable` CLI — inspect, check, and export a weekly timetable from the command line.
//!
//! Input is a JSON timetable document (`{"settings": {...}, "entries": [...]}`),
//! read from a file with `-i` or from stdin.
//!
//! ## Usage
//!
//! ```sh
//! # List the slot-range labels of the grid
//! timetable slots -i week.json
//!
//! # Same grid at half-hour granularity
//! timetable slots -i week.json --format half-hour
//!
//! # Print the weekly grid, one block per working day
//! timetable grid -i week.json
//!
//! # Export the spreadsheet form as CSV
//! timetable export -i week.json -o week.csv
//!
//! # Into a directory, named weekly-schedule-YYYY-MM-DD.csv
//! timetable export -i week.json -o exports/
//!
//! # Report overlapping or displaced entries (exit code 1 if any)
//! cat week.json | timetable check
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use timegrid::export::{export_file_name, write_csv, ExportFormat};
use timegrid::{
    find_conflicts, format_slot_range, ExportGrid, GridCell, TimeFormat, TimetableDocument,
    TimetableEntry, TimetableStore,
};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "timetable",
    version,
    about = "Weekly timetable grid: slots, layout, overlap checks and export"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct InputArgs {
    /// Timetable JSON document (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Override the slot granularity: hourly or half-hour
    #[arg(long)]
    format: Option<TimeFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the slot-range labels, one per line
    Slots {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the weekly grid as text
    Grid {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Export the spreadsheet form of the grid as CSV
    Export {
        #[command(flatten)]
        input: InputArgs,
        /// Output file or directory (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report overlapping entries and entries hidden by a shared start slot
    Check {
        /// Timetable JSON document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Slots { input } => {
            let store = load_store(&input)?;
            let settings = store.settings();
            let slots = settings.time_slots()?;
            for &slot in &slots {
                println!("{}", format_slot_range(slot, settings.time_format, &slots));
            }
        }
        Commands::Grid { input } => {
            let store = load_store(&input)?;
            print!("{}", render_grid(&store)?);
        }
        Commands::Export { input, output } => {
            let store = load_store(&input)?;
            let grid = ExportGrid::from_schedule(&store.schedule()?, store.settings().time_format);
            match output.as_deref() {
                Some(path) => {
                    let path = output_path(Path::new(path));
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("Failed to create file: {}", path.display()))?;
                    write_csv(&grid, file).context("Failed to write spreadsheet")?;
                    debug!(path = %path.display(), "spreadsheet written");
                }
                None => {
                    write_csv(&grid, io::stdout().lock()).context("Failed to write spreadsheet")?;
                }
            }
        }
        Commands::Check { input } => {
            let store = load_store(&InputArgs {
                input,
                format: None,
            })?;
            let problems = check(&store)?;
            if problems.is_empty() {
                println!("No conflicts.");
            } else {
                for line in &problems {
                    println!("{}", line);
                }
                process::exit(1);
            }
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();
}

fn load_store(args: &InputArgs) -> Result<TimetableStore> {
    let json = read_input(args.input.as_deref())?;
    let mut document =
        TimetableDocument::from_json(&json).context("Failed to parse timetable document")?;

    if let Some(format) = args.format {
        document.settings = document.settings.with_time_format(format);
    }
    debug!(
        entries = document.entries.len(),
        format = %document.settings.time_format,
        "loaded timetable document"
    );

    TimetableStore::from_document(document).context("Invalid timetable document")
}

fn describe(entry: &TimetableEntry) -> String {
    format!(
        "{} {}-{} {} ({}, {})",
        entry.day, entry.start_time, entry.end_time, entry.subject, entry.location, entry.lecturer
    )
}

/// One block per working day; each line is a slot range and what occupies it.
fn render_grid(store: &TimetableStore) -> Result<String> {
    let schedule = store.schedule()?;
    let time_format = store.settings().time_format;
    let slots = schedule.time_slots();
    let mut out = String::new();

    for &day in schedule.work_days() {
        out.push_str(&format!("{}\n", day));
        for (index, cell) in schedule.row(day) {
            match cell {
                GridCell::Anchor(placement) => {
                    let entry = &placement.entry;
                    out.push_str(&format!(
                        "  {}-{}  {} | {} | {}\n",
                        entry.start_time,
                        entry.end_time,
                        entry.subject,
                        entry.location,
                        entry.lecturer
                    ));
                }
                GridCell::Free => {
                    let label = format_slot_range(slots[index], time_format, slots);
                    out.push_str(&format!("  {}  -\n", label));
                }
                GridCell::Covered => {}
            }
        }
    }

    for entry in schedule.displaced() {
        out.push_str(&format!("hidden (shares a start slot): {}\n", describe(entry)));
    }

    Ok(out)
}

/// Human-readable problem lines; empty when the timetable is clean.
fn check(store: &TimetableStore) -> Result<Vec<String>> {
    let mut problems: Vec<String> = find_conflicts(store.entries())
        .iter()
        .map(|c| {
            format!(
                "overlap ({} min): {} <-> {}",
                c.overlap_minutes,
                describe(&c.entry_a),
                describe(&c.entry_b)
            )
        })
        .collect();

    let schedule = store.schedule()?;
    problems.extend(
        schedule
            .displaced()
            .iter()
            .map(|e| format!("hidden (shares a start slot): {}", describe(e))),
    );

    Ok(problems)
}

/// A directory target gets the dated export name.
fn output_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        let today = chrono::Local::now().date_naive();
        path.join(export_file_name(ExportFormat::Csv, today))
    } else {
        path.to_path_buf()
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
