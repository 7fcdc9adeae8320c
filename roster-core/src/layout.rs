//! Fixed cell offsets of the weekly duty roster template.
//!
//! All coordinates are 0-based (row, column); cell B1 is (0, 1).

/// Primary cell holding the week label (B1).
pub const WEEK_LABEL_PRIMARY: (usize, usize) = (0, 1);

/// Fallback cell for the week label when B1 is blank (B2).
pub const WEEK_LABEL_FALLBACK: (usize, usize) = (1, 1);

/// Row holding the "Monday 11/11" style day headers (row 4 in the sheet).
pub const DAY_HEADER_ROW: usize = 3;

/// Anchor column of each day slot (B, E, H, K, N, Q, T).
pub const DAY_COLUMNS: [usize; 7] = [1, 4, 7, 10, 13, 16, 19];

/// Column holding employee names (A).
pub const NAME_COLUMN: usize = 0;

/// First row that can hold an employee name (row 5 in the sheet).
pub const FIRST_EMPLOYEE_ROW: usize = 4;

/// Offset from a day's anchor column to its shift start cell.
pub const START_OFFSET: usize = 0;

/// Offset from a day's anchor column to its shift end cell.
pub const END_OFFSET: usize = 1;

/// Offset from a day's anchor column to its task cell.
pub const TASK_OFFSET: usize = 2;
