//! Calendar event types produced from a roster.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::ics;

/// Product identifier written to generated calendars.
pub const DEFAULT_PROD_ID: &str = "-//Sushi Restaurant Shift Schedule//EN";

/// Zone every shift is localized to.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Pacific::Auckland;

/// A single shift as a calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl CalendarEvent {
    pub fn start_time(&self) -> EventTime {
        EventTime::zoned(&self.start)
    }

    pub fn end_time(&self) -> EventTime {
        EventTime::zoned(&self.end)
    }
}

/// An ordered set of events rendered as one VCALENDAR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDocument {
    pub prod_id: String,
    pub events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    pub fn new(prod_id: impl Into<String>) -> Self {
        CalendarDocument {
            prod_id: prod_id.into(),
            events: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Render as RFC 5545 text, stamping every event with `dtstamp`.
    pub fn to_ics(&self, dtstamp: DateTime<Utc>) -> String {
        ics::generate_calendar(self, dtstamp)
    }
}

/// Date or date-time value as it appears in an .ics file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EventTime {
    /// All-day event (VALUE=DATE)
    Date(NaiveDate),
    /// UTC datetime (Z suffix)
    DateTimeUtc(DateTime<Utc>),
    /// Floating datetime (no zone)
    DateTimeFloating(NaiveDateTime),
    /// Local datetime with a TZID parameter
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl EventTime {
    pub fn zoned(dt: &DateTime<Tz>) -> Self {
        EventTime::DateTimeZoned {
            datetime: dt.naive_local(),
            tzid: dt.timezone().name().to_string(),
        }
    }
}

impl std::fmt::Display for EventTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::DateTimeUtc(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
            EventTime::DateTimeFloating(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            EventTime::DateTimeZoned { datetime, tzid } => {
                write!(f, "{} {}", datetime.format("%Y-%m-%d %H:%M"), tzid)
            }
        }
    }
}

/// An event read back from an .ics file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEvent {
    pub uid: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub start: EventTime,
    pub end: Option<EventTime>,
}
