//! Duty roster to iCalendar conversion engine.
//!
//! A weekly roster is a fixed-layout spreadsheet without declared headers.
//! This crate reads it into a [`Grid`], resolves the dated day columns and
//! employee rows, extracts each day's shift and renders the shifts as
//! RFC 5545 events:
//! - [`grid::load`] reads a workbook (or CSV) into a grid
//! - [`week`] resolves the week label and dated day columns
//! - [`employee`] lists and looks up employee rows
//! - [`shift`] reads one day's start/end/task cells
//! - [`builder::build`] turns a row into a [`CalendarDocument`]
//! - [`convert()`] runs all of the above for one file and employee

pub mod builder;
pub mod convert;
pub mod employee;
pub mod error;
pub mod event;
pub mod grid;
pub mod ics;
pub mod layout;
pub mod shift;
pub mod week;

pub use builder::{BuildOptions, BuildOutcome, SkippedDay, build};
pub use convert::{Conversion, ConvertOptions, convert, default_output_filename, find_roster_file};
pub use employee::{Employee, find_employee_row, list_employees};
pub use error::{RosterError, RosterResult, SkipReason};
pub use event::{CalendarDocument, CalendarEvent, EventTime, ParsedEvent};
pub use grid::{Cell, Grid, load};
pub use shift::ShiftInterval;
pub use week::{DayInfo, resolve_days, resolve_week_label};
