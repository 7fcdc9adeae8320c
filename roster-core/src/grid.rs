//! Untyped 2-D cell grid loaded from a roster spreadsheet.
//!
//! The grid carries no notion of headers or column meaning. Reads outside the
//! loaded area yield [`Cell::Empty`], so callers can read fixed offsets
//! without bounds checks.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{Duration, NaiveDate};

use crate::error::{RosterError, RosterResult};

static EMPTY_CELL: Cell = Cell::Empty;

/// Seconds in one spreadsheet day.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
}

impl Cell {
    /// Build a cell from raw text; whitespace-only text is empty.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Immutable row-major cell grid. Rows may have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Grid { rows }
    }

    /// Build a grid from rows of plain text, trimming each cell.
    pub fn from_text_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|s| Cell::from_text(s.as_ref())).collect())
            .collect();
        Grid { rows }
    }

    /// Number of rows, including trailing rows that may be blank.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, col); out-of-range positions are empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Text at (row, col), or `None` when the cell is empty or out of range.
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        self.cell(row, col).as_str()
    }
}

/// Load the first worksheet of a spreadsheet (or a CSV file) into a grid.
pub fn load(path: &Path) -> RosterResult<Grid> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let grid = if is_csv {
        load_csv(path)?
    } else {
        load_workbook(path)?
    };

    tracing::debug!(path = %path.display(), rows = grid.height(), "Loaded roster grid");
    Ok(grid)
}

fn load_error(path: &Path, reason: impl ToString) -> RosterError {
    RosterError::Load {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn load_workbook(path: &Path) -> RosterResult<Grid> {
    let mut workbook = open_workbook_auto(path).map_err(|e| load_error(path, e))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| load_error(path, "workbook contains no worksheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| load_error(path, e))?;

    Ok(grid_from_range(&range))
}

/// Convert a worksheet range into a grid addressed from A1.
///
/// The used range may start below or right of A1; the leading rows and
/// columns are padded with empty cells.
fn grid_from_range(range: &Range<Data>) -> Grid {
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }

    Grid::new(rows)
}

fn load_csv(path: &Path) -> RosterResult<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| load_error(path, e))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| load_error(path, e))?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(Grid::new(rows))
}

/// Render a spreadsheet value as the text the roster logic works with.
fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Int(i) => Cell::Text(i.to_string()),
        Data::Float(f) => Cell::Text(format_float(*f)),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => serial_to_text(dt.as_f64()).map_or(Cell::Empty, Cell::Text),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_text(s),
        Data::Error(e) => {
            tracing::debug!(error = ?e, "Treating spreadsheet error cell as empty");
            Cell::Empty
        }
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Convert a spreadsheet date serial (days since 1899-12-30) into text.
///
/// Pure time-of-day values (serial below 1) become `HH:MM:SS`; values with a
/// date part become `YYYY-MM-DD HH:MM:SS`.
fn serial_to_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let days = serial.trunc();
    let mut seconds = ((serial - days) * SECONDS_PER_DAY).round() as i64;
    if days == 0.0 {
        // A time of day never rounds up into the next day
        seconds = seconds.min(SECONDS_PER_DAY as i64 - 1);
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let datetime = epoch
        .checked_add_signed(Duration::days(days as i64))?
        .checked_add_signed(Duration::seconds(seconds))?;

    if days == 0.0 {
        Some(datetime.format("%H:%M:%S").to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
