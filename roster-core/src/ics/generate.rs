//! ICS file generation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Property};

use super::timezone::vtimezone;
use crate::event::{CalendarDocument, CalendarEvent};

/// Maximum octets per content line before folding (RFC 5545 section 3.1).
const MAX_LINE_OCTETS: usize = 75;

/// Generate .ics content for a whole roster calendar
pub fn generate_calendar(document: &CalendarDocument, dtstamp: DateTime<Utc>) -> String {
    let mut cal = Calendar::new();
    let dtstamp = dtstamp.format("%Y%m%dT%H%M%SZ").to_string();

    for event in &document.events {
        cal.push(build_vevent(event, &dtstamp));
    }

    let cal = cal.done();

    finalize(&cal.to_string(), &document.prod_id, &timezone_definitions(document))
}

fn build_vevent(event: &CalendarEvent, dtstamp: &str) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);

    // DTSTAMP is required; set it so output does not depend on the clock
    ics_event.add_property("DTSTAMP", dtstamp);

    ics_event.summary(&event.summary);
    add_zoned_property(&mut ics_event, "DTSTART", &event.start);
    add_zoned_property(&mut ics_event, "DTEND", &event.end);
    ics_event.description(&event.description);

    ics_event.done()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with the document's product identifier
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Insert the VTIMEZONE definitions ahead of the first VEVENT
fn finalize(ics: &str, prod_id: &str, timezones: &str) -> String {
    let mut result = String::with_capacity(ics.len() + timezones.len());
    let mut timezones = Some(timezones).filter(|t| !t.is_empty());

    for line in ics.lines() {
        if line == "BEGIN:VEVENT" {
            if let Some(definitions) = timezones.take() {
                result.push_str(definitions);
            }
        }

        if line.starts_with("PRODID:") {
            result.push_str(&fold_line(&format!("PRODID:{prod_id}")));
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Fold a content line at 75 octets, ending every physical line with CRLF.
fn fold_line(line: &str) -> String {
    let mut folded = String::with_capacity(line.len() + 8);
    let mut octets = 0;

    for ch in line.chars() {
        // Continuation lines start with a space, which counts toward the limit
        if octets + ch.len_utf8() > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            octets = 1;
        }
        folded.push(ch);
        octets += ch.len_utf8();
    }

    folded.push_str("\r\n");
    folded
}

/// Add a date-time property as local time with a TZID parameter
fn add_zoned_property(ics_event: &mut icalendar::Event, name: &str, time: &DateTime<Tz>) {
    let mut prop = Property::new(name, time.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", time.timezone().name());
    ics_event.append_property(prop);
}

/// One VTIMEZONE per zone the events use, spanning that zone's events
fn timezone_definitions(document: &CalendarDocument) -> String {
    let mut spans: BTreeMap<&'static str, (Tz, DateTime<Utc>, DateTime<Utc>)> = BTreeMap::new();

    for event in &document.events {
        for time in [&event.start, &event.end] {
            let instant = time.with_timezone(&Utc);
            spans
                .entry(time.timezone().name())
                .and_modify(|(_, from, until)| {
                    *from = (*from).min(instant);
                    *until = (*until).max(instant);
                })
                .or_insert((time.timezone(), instant, instant));
        }
    }

    spans
        .values()
        .map(|(tz, from, until)| vtimezone(*tz, *from, *until))
        .collect()
}
