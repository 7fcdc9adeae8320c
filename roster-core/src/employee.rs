//! Employee name column lookup.

use serde::Serialize;

use crate::error::{RosterError, RosterResult};
use crate::grid::Grid;
use crate::layout::{FIRST_EMPLOYEE_ROW, NAME_COLUMN};

/// An employee name and the grid row holding their shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub name: String,
    pub row: usize,
}

/// All non-blank names in the name column, top to bottom.
///
/// Duplicate names are kept as separate entries.
pub fn list_employees(grid: &Grid) -> Vec<Employee> {
    (FIRST_EMPLOYEE_ROW..grid.height())
        .filter_map(|row| {
            grid.text(row, NAME_COLUMN).map(|name| Employee {
                name: name.to_string(),
                row,
            })
        })
        .collect()
}

/// Row of the first employee whose name contains `name`, ignoring case.
pub fn find_employee_row(grid: &Grid, name: &str) -> RosterResult<usize> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return Err(RosterError::EmployeeNotFound(name.to_string()));
    }

    let mut matches = list_employees(grid)
        .into_iter()
        .filter(|employee| employee.name.to_lowercase().contains(&needle));

    let first = matches
        .next()
        .ok_or_else(|| RosterError::EmployeeNotFound(name.to_string()))?;

    let others: Vec<String> = matches.map(|e| e.name).collect();
    if !others.is_empty() {
        tracing::warn!(
            query = name,
            chosen = %first.name,
            row = first.row,
            others = ?others,
            "Employee name is ambiguous, using the first match"
        );
    }

    tracing::debug!(query = name, row = first.row, "Found employee row");
    Ok(first.row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Grid {
        let mut rows: Vec<Vec<&str>> = vec![vec!["Name"], vec![], vec![], vec!["Staff"]];
        rows.extend(names.iter().map(|n| vec![*n, "09:00", "17:00"]));
        Grid::from_text_rows(rows)
    }

    #[test]
    fn test_list_employees_skips_blanks() {
        let grid = roster(&["Alice Tan", "", "BOB LEE"]);

        let employees = list_employees(&grid);

        assert_eq!(
            employees,
            vec![
                Employee {
                    name: "Alice Tan".to_string(),
                    row: 4
                },
                Employee {
                    name: "BOB LEE".to_string(),
                    row: 6
                },
            ]
        );
    }

    #[test]
    fn test_list_employees_keeps_duplicates() {
        let grid = roster(&["Lulu", "Lulu"]);
        assert_eq!(list_employees(&grid).len(), 2);
    }

    #[test]
    fn test_list_employees_empty_grid() {
        assert!(list_employees(&Grid::default()).is_empty());
    }

    #[test]
    fn test_find_is_case_insensitive_substring() {
        let grid = roster(&["Alice Tan", "BOB LEE"]);

        assert_eq!(find_employee_row(&grid, "bob").unwrap(), 5);
        assert_eq!(find_employee_row(&grid, "tan").unwrap(), 4);
    }

    #[test]
    fn test_find_ambiguous_returns_first() {
        let grid = roster(&["Ann Lee", "Bob Lee"]);
        assert_eq!(find_employee_row(&grid, "lee").unwrap(), 4);
    }

    #[test]
    fn test_find_missing_is_not_found() {
        let grid = roster(&["Alice Tan", "BOB LEE"]);

        let err = find_employee_row(&grid, "carol").unwrap_err();
        assert!(matches!(err, RosterError::EmployeeNotFound(ref n) if n == "carol"));
    }

    #[test]
    fn test_find_ignores_header_rows() {
        let grid = roster(&["Alice Tan"]);
        assert!(find_employee_row(&grid, "staff").is_err());
    }

    #[test]
    fn test_find_blank_query_never_matches() {
        let grid = roster(&["Alice Tan"]);
        assert!(find_employee_row(&grid, "  ").is_err());
    }
}
