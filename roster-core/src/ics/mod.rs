//! ICS file generation and parsing.
//!
//! This module handles reading and writing .ics files according to RFC 5545.

mod generate;
mod parse;
mod timezone;

pub use generate::generate_calendar;
pub use parse::parse_events;
