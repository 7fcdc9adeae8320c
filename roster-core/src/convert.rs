//! End-to-end conversion of a roster file into one employee's calendar.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

use crate::builder::{self, BuildOptions, SkippedDay};
use crate::employee::{self, Employee};
use crate::error::RosterResult;
use crate::event::CalendarDocument;
use crate::grid::{self, Grid};
use crate::layout::NAME_COLUMN;
use crate::week::{self, DayInfo};

/// File name prefix used when searching a directory for a roster.
pub const ROSTER_FILE_PREFIX: &str = "Duty Roster";

/// Extension of roster files found by directory search.
pub const ROSTER_FILE_EXTENSION: &str = ".xlsx";

/// Settings for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Year assigned to the roster's days (January days may get the next one).
    pub reference_year: i32,
    pub build: BuildOptions,
}

impl Default for ConvertOptions {
    /// Uses the current local year.
    fn default() -> Self {
        ConvertOptions {
            reference_year: Local::now().year(),
            build: BuildOptions::default(),
        }
    }
}

/// Result of converting one employee's week.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub week_label: Option<String>,
    pub employee: Employee,
    pub days: Vec<DayInfo>,
    pub document: CalendarDocument,
    pub skipped: Vec<SkippedDay>,
}

impl Conversion {
    pub fn to_ics(&self, dtstamp: DateTime<Utc>) -> String {
        self.document.to_ics(dtstamp)
    }

    /// Write the calendar to `path`, returning the number of bytes written.
    pub fn write_to(&self, path: &Path, dtstamp: DateTime<Utc>) -> RosterResult<usize> {
        let ics = self.to_ics(dtstamp);
        std::fs::write(path, ics.as_bytes())?;
        tracing::debug!(path = %path.display(), bytes = ics.len(), "Wrote calendar");
        Ok(ics.len())
    }
}

/// Load `path` and build the calendar for the employee matching `employee_name`.
pub fn convert(path: &Path, employee_name: &str, options: &ConvertOptions) -> RosterResult<Conversion> {
    let grid = grid::load(path)?;
    convert_grid(&grid, employee_name, options)
}

/// Build the calendar for `employee_name` from an already loaded grid.
pub fn convert_grid(grid: &Grid, employee_name: &str, options: &ConvertOptions) -> RosterResult<Conversion> {
    let week_label = week::resolve_week_label(grid);
    if week_label.is_none() {
        tracing::debug!("Roster has no week label");
    }

    let days = week::resolve_days(grid, options.reference_year)?;
    let row = employee::find_employee_row(grid, employee_name)?;
    let employee = Employee {
        name: grid.text(row, NAME_COLUMN).unwrap_or(employee_name).to_string(),
        row,
    };

    let mut build_options = options.build.clone();
    if build_options.uid_seed.is_empty() {
        build_options.uid_seed = employee.name.clone();
    }

    let outcome = builder::build(grid, row, &days, &build_options);

    tracing::info!(
        employee = %employee.name,
        events = outcome.document.events.len(),
        skipped = outcome.skipped.len(),
        "Converted roster"
    );

    Ok(Conversion {
        week_label,
        employee,
        days,
        document: outcome.document,
        skipped: outcome.skipped,
    })
}

/// First file in `dir` named like `Duty Roster*.xlsx`, by file name order.
pub fn find_roster_file(dir: &Path) -> RosterResult<Option<PathBuf>> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with(ROSTER_FILE_PREFIX) && name.ends_with(ROSTER_FILE_EXTENSION))
        })
        .collect();

    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Output file name for a calendar generated on `date`.
pub fn default_output_filename(date: NaiveDate) -> String {
    format!("sushi_schedule_week_{}.ics", date.format("%Y%m%d"))
}
