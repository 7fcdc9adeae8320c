//! Shift cell extraction for one employee and one day.

use chrono::NaiveTime;

use crate::error::SkipReason;
use crate::grid::Grid;
use crate::layout::{END_OFFSET, START_OFFSET, TASK_OFFSET};

/// A scheduled shift read from three adjacent roster cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Task label; empty when the task cell is blank.
    pub task: String,
}

/// Read the shift at `(row, column)`, `(row, column + 1)`, `(row, column + 2)`.
///
/// Returns `Ok(None)` when the start or end cell is blank.
pub fn extract(grid: &Grid, row: usize, column: usize) -> Result<Option<ShiftInterval>, SkipReason> {
    let (Some(start), Some(end)) = (
        grid.text(row, column + START_OFFSET),
        grid.text(row, column + END_OFFSET),
    ) else {
        return Ok(None);
    };
    let task = grid.text(row, column + TASK_OFFSET).unwrap_or_default();

    tracing::debug!(row, column, start, end, task, "Read shift cells");

    Ok(Some(ShiftInterval {
        start: parse_time(start)?,
        end: parse_time(end)?,
        task: task.to_string(),
    }))
}

/// Drop anything past `hour:minute` ("09:30:00" becomes "09:30").
///
/// Text without a colon is returned unchanged.
pub fn normalize_time(text: &str) -> String {
    let mut parts = text.split(':');
    match (parts.next(), parts.next()) {
        (Some(hour), Some(minute)) => format!("{hour}:{minute}"),
        _ => text.to_string(),
    }
}

/// Parse roster time text into a time of day.
fn parse_time(text: &str) -> Result<NaiveTime, SkipReason> {
    let normalized = normalize_time(text);
    let malformed = || SkipReason::MalformedTime(text.to_string());

    let (hour, minute) = normalized.split_once(':').ok_or_else(malformed)?;
    let hour: u32 = hour.trim().parse().map_err(|_| malformed())?;
    let minute: u32 = minute.trim().parse().map_err(|_| malformed())?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| SkipReason::TimeOutOfRange(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn row(cells: &[&str]) -> Grid {
        let mut row = vec![""];
        row.extend_from_slice(cells);
        Grid::from_text_rows(vec![row])
    }

    #[test]
    fn test_normalize_drops_seconds() {
        assert_eq!(normalize_time("09:30:00"), "09:30");
        assert_eq!(normalize_time("17:00"), "17:00");
        assert_eq!(normalize_time("OFF"), "OFF");
    }

    #[test]
    fn test_extract_full_shift() {
        let grid = row(&["09:30:00", "17:00:00", "Sushi bar"]);

        let shift = extract(&grid, 0, 1).unwrap().unwrap();

        assert_eq!(shift.start, time(9, 30));
        assert_eq!(shift.end, time(17, 0));
        assert_eq!(shift.task, "Sushi bar");
    }

    #[test]
    fn test_extract_without_task() {
        let grid = row(&["10:00", "14:00"]);

        let shift = extract(&grid, 0, 1).unwrap().unwrap();

        assert_eq!(shift.task, "");
    }

    #[test]
    fn test_blank_start_or_end_is_no_shift() {
        assert_eq!(extract(&row(&["", "17:00", "Kitchen"]), 0, 1), Ok(None));
        assert_eq!(extract(&row(&["09:00", "", "Kitchen"]), 0, 1), Ok(None));
        assert_eq!(extract(&row(&[]), 0, 1), Ok(None));
    }

    #[test]
    fn test_malformed_time_is_skip_reason() {
        let grid = row(&["morning", "17:00"]);

        assert_eq!(
            extract(&grid, 0, 1),
            Err(SkipReason::MalformedTime("morning".to_string()))
        );
    }

    #[test]
    fn test_datetime_text_is_malformed() {
        let grid = row(&["2024-11-11 09:30:00", "17:00"]);

        assert!(matches!(
            extract(&grid, 0, 1),
            Err(SkipReason::MalformedTime(_))
        ));
    }

    #[test]
    fn test_out_of_range_time() {
        let grid = row(&["09:00", "25:00"]);

        assert_eq!(
            extract(&grid, 0, 1),
            Err(SkipReason::TimeOutOfRange("25:00".to_string()))
        );
    }
}
