//! ICS file parsing using the icalendar crate's parser.

use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{RosterError, RosterResult};
use crate::event::{EventTime, ParsedEvent};

/// Parse every VEVENT in an .ics document.
///
/// Events without a usable DTSTART are skipped.
pub fn parse_events(content: &str) -> RosterResult<Vec<ParsedEvent>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| RosterError::IcsParse(e.to_string()))?;

    Ok(calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(parse_vevent)
        .collect())
}

fn parse_vevent(vevent: &Component) -> Option<ParsedEvent> {
    let start = to_event_time(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);
    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(to_event_time);

    let uid = vevent.find_prop("UID").map(|p| p.val.to_string());
    // TEXT values come back from the parser already unescaped
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_default();
    let description = vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string());

    Some(ParsedEvent {
        uid,
        summary,
        description,
        start,
        end,
    })
}

/// Convert icalendar's DatePerhapsTime to our EventTime, preserving timezone info
fn to_event_time(dpt: DatePerhapsTime) -> EventTime {
    match dpt {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => EventTime::DateTimeUtc(dt),
            CalendarDateTime::Floating(naive) => EventTime::DateTimeFloating(naive),
            CalendarDateTime::WithTimezone { date_time, tzid } => EventTime::DateTimeZoned {
                datetime: date_time,
                tzid,
            },
        },
    }
}
