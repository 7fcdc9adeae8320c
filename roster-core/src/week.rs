//! Week label and day header resolution.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::error::{RosterError, RosterResult};
use crate::grid::Grid;
use crate::layout::{DAY_COLUMNS, DAY_HEADER_ROW, WEEK_LABEL_FALLBACK, WEEK_LABEL_PRIMARY};

/// Matches headers like "Monday 11/11" (weekday, then day/month).
static DAY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s+(\d{1,2})/(\d{1,2})").expect("valid day header regex"));

/// One resolved day column of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayInfo {
    pub weekday: String,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    /// First data column of this day (the shift start cell).
    pub column: usize,
}

impl DayInfo {
    /// Calendar date, or `None` if day/month/year do not form a real date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Week label from B1, falling back to B2.
pub fn resolve_week_label(grid: &Grid) -> Option<String> {
    let (row, col) = WEEK_LABEL_PRIMARY;
    let (fallback_row, fallback_col) = WEEK_LABEL_FALLBACK;

    grid.text(row, col)
        .or_else(|| grid.text(fallback_row, fallback_col))
        .map(str::to_string)
}

/// Resolve the day headers into dated columns, left to right.
///
/// `reference_year` is the year assigned to every day unless the week spans
/// December and January, in which case January days get the following year.
pub fn resolve_days(grid: &Grid, reference_year: i32) -> RosterResult<Vec<DayInfo>> {
    let required = DAY_HEADER_ROW + 1;
    if grid.height() < required {
        return Err(RosterError::DaysResolution {
            rows: grid.height(),
            required,
        });
    }

    let matched: Vec<(String, u32, u32, usize)> = DAY_COLUMNS
        .iter()
        .filter_map(|&column| {
            let text = grid.text(DAY_HEADER_ROW, column)?;
            match parse_day_header(text) {
                Some((weekday, day, month)) => Some((weekday, day, month, column)),
                None => {
                    tracing::debug!(column, header = text, "Skipping unrecognized day header");
                    None
                }
            }
        })
        .collect();

    let months: BTreeSet<u32> = matched.iter().map(|(_, _, month, _)| *month).collect();
    let spans_new_year = months.contains(&12) && months.contains(&1);

    let days: Vec<DayInfo> = matched
        .into_iter()
        .map(|(weekday, day, month, column)| {
            let year = if spans_new_year && month == 1 {
                reference_year + 1
            } else {
                reference_year
            };
            DayInfo {
                weekday,
                day,
                month,
                year,
                column,
            }
        })
        .collect();

    tracing::debug!(count = days.len(), spans_new_year, "Resolved roster days");
    Ok(days)
}

/// Extract (weekday, day, month) from a header like "Monday 11/11".
fn parse_day_header(text: &str) -> Option<(String, u32, u32)> {
    let caps = DAY_HEADER.captures(text)?;
    let weekday = caps.get(1)?.as_str().to_string();
    let day = caps.get(2)?.as_str().parse().ok()?;
    let month = caps.get(3)?.as_str().parse().ok()?;
    Some((weekday, day, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a grid whose header row carries the given day labels in the
    /// fixed day columns.
    fn grid_with_headers(headers: &[&str]) -> Grid {
        let mut header_row = vec![String::new(); 22];
        for (label, &column) in headers.iter().zip(DAY_COLUMNS.iter()) {
            header_row[column] = label.to_string();
        }
        Grid::from_text_rows(vec![
            vec![String::new(), "Week 46".to_string()],
            vec![],
            vec![],
            header_row,
        ])
    }

    #[test]
    fn test_week_label_prefers_primary() {
        let grid = Grid::from_text_rows(vec![vec!["", "Week 46"], vec!["", "Week 47"]]);
        assert_eq!(resolve_week_label(&grid).as_deref(), Some("Week 46"));
    }

    #[test]
    fn test_week_label_falls_back() {
        let grid = Grid::from_text_rows(vec![vec!["", " "], vec!["", "Week 47"]]);
        assert_eq!(resolve_week_label(&grid).as_deref(), Some("Week 47"));
    }

    #[test]
    fn test_week_label_missing_is_none() {
        assert_eq!(resolve_week_label(&Grid::default()), None);
    }

    #[test]
    fn test_too_few_rows_is_error() {
        let grid = Grid::from_text_rows(vec![vec!["", "Week 46"], vec![], vec![]]);

        let err = resolve_days(&grid, 2024).unwrap_err();
        assert!(
            matches!(err, RosterError::DaysResolution { rows: 3, required: 4 }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_days_parsed_in_column_order() {
        let grid = grid_with_headers(&["Monday 11/11", "Tuesday 12/11", "Wednesday 13/11"]);

        let days = resolve_days(&grid, 2024).unwrap();

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].weekday, "Monday");
        assert_eq!((days[0].day, days[0].month), (11, 11));
        assert_eq!(days[0].column, 1);
        assert_eq!(days[1].column, 4);
        assert_eq!(days[2].column, 7);
        assert!(days.iter().all(|d| d.year == 2024));
    }

    #[test]
    fn test_unmatched_headers_are_skipped() {
        let grid = grid_with_headers(&["Monday 11/11", "CLOSED", "", "Thursday 14/11"]);

        let days = resolve_days(&grid, 2024).unwrap();

        let columns: Vec<usize> = days.iter().map(|d| d.column).collect();
        assert_eq!(columns, vec![1, 10]);
    }

    #[test]
    fn test_year_rollover_across_new_year() {
        let grid = grid_with_headers(&[
            "Monday 30/12",
            "Tuesday 31/12",
            "Wednesday 1/1",
            "Thursday 2/1",
        ]);

        let days = resolve_days(&grid, 2024).unwrap();

        for day in &days {
            let expected = if day.month == 1 { 2025 } else { 2024 };
            assert_eq!(day.year, expected, "wrong year for {day:?}");
        }
        assert_eq!(days[2].date(), NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[test]
    fn test_no_rollover_within_one_month() {
        let grid = grid_with_headers(&["Monday 6/1", "Tuesday 7/1", "Wednesday 8/1"]);

        let days = resolve_days(&grid, 2025).unwrap();

        assert!(days.iter().all(|d| d.year == 2025));
    }

    #[test]
    fn test_header_with_surrounding_text() {
        assert_eq!(
            parse_day_header("  Friday   15/11 (late) "),
            Some(("Friday".to_string(), 15, 11))
        );
        assert_eq!(parse_day_header("15/11"), None);
        assert_eq!(parse_day_header("Friday"), None);
    }
}
