//! Error types for roster conversion.

use thiserror::Error;

/// Structural failures that abort a conversion run.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Could not read roster '{path}': {reason}")]
    Load { path: String, reason: String },

    #[error("Could not resolve day headers: roster has {rows} rows, need at least {required}")]
    DaysResolution { rows: usize, required: usize },

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Why a single day produced no calendar event.
///
/// These never abort a run; they are collected next to the generated events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("no shift scheduled")]
    NoShift,

    #[error("malformed time '{0}'")]
    MalformedTime(String),

    #[error("time out of range '{0}'")]
    TimeOutOfRange(String),

    #[error("invalid date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("local time {0} does not exist in {1}")]
    NonexistentLocalTime(String, String),
}
