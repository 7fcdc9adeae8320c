//! VTIMEZONE components for the zones named in TZID parameters.
//!
//! Observances are derived from the zone's offsets: the scan walks the
//! covered period hour by hour, then narrows each offset change to the minute.

use chrono::{DateTime, Duration, DurationRound, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::{OffsetComponents, OffsetName, Tz};

/// Observances cover this many days either side of the events.
const MARGIN_DAYS: i64 = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ZoneState {
    /// Seconds east of UTC
    offset: i32,
    daylight: bool,
}

/// One STANDARD or DAYLIGHT sub-component.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Observance {
    daylight: bool,
    /// Onset as wall time in the offset that was in effect before it
    start: NaiveDateTime,
    offset_from: i32,
    offset_to: i32,
    name: Option<String>,
}

/// Render a VTIMEZONE for `tz` covering `from..=until`, CRLF-terminated.
pub(crate) fn vtimezone(tz: Tz, from: DateTime<Utc>, until: DateTime<Utc>) -> String {
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VTIMEZONE");
    push_line(&mut out, &format!("TZID:{}", tz.name()));

    let margin = Duration::days(MARGIN_DAYS);
    for observance in observances(tz, from - margin, until + margin) {
        let kind = if observance.daylight { "DAYLIGHT" } else { "STANDARD" };
        push_line(&mut out, &format!("BEGIN:{kind}"));
        push_line(&mut out, &format!("DTSTART:{}", observance.start.format("%Y%m%dT%H%M%S")));
        push_line(&mut out, &format!("TZOFFSETFROM:{}", format_offset(observance.offset_from)));
        push_line(&mut out, &format!("TZOFFSETTO:{}", format_offset(observance.offset_to)));
        if let Some(name) = observance.name {
            push_line(&mut out, &format!("TZNAME:{name}"));
        }
        push_line(&mut out, &format!("END:{kind}"));
    }

    push_line(&mut out, "END:VTIMEZONE");
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str("\r\n");
}

fn state_at(tz: Tz, at: DateTime<Utc>) -> (ZoneState, Option<String>) {
    let offset = tz.offset_from_utc_datetime(&at.naive_utc());
    let state = ZoneState {
        offset: offset.fix().local_minus_utc(),
        daylight: offset.dst_offset() != Duration::zero(),
    };
    (state, offset.abbreviation().map(str::to_string))
}

fn wall_time(at: DateTime<Utc>, offset: i32) -> NaiveDateTime {
    at.naive_utc() + Duration::seconds(i64::from(offset))
}

/// The observance in effect at `start`, then one per offset change up to `end`.
fn observances(tz: Tz, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Observance> {
    let step = Duration::hours(1);
    let start = start.duration_trunc(step).unwrap_or(start);

    let (mut state, name) = state_at(tz, start);
    let mut list = vec![Observance {
        daylight: state.daylight,
        start: wall_time(start, state.offset),
        offset_from: state.offset,
        offset_to: state.offset,
        name,
    }];

    let mut cursor = start;
    while cursor < end {
        let next = cursor + step;
        if state_at(tz, next).0 != state {
            let at = first_change(tz, cursor, next, state);
            let (changed, name) = state_at(tz, at);
            list.push(Observance {
                daylight: changed.daylight,
                start: wall_time(at, state.offset),
                offset_from: state.offset,
                offset_to: changed.offset,
                name,
            });
            state = changed;
        }
        cursor = next;
    }

    list
}

/// First minute in `(before, after]` whose state differs from `state`.
fn first_change(
    tz: Tz,
    before: DateTime<Utc>,
    after: DateTime<Utc>,
    state: ZoneState,
) -> DateTime<Utc> {
    let mut at = before;
    while at < after {
        at += Duration::minutes(1);
        if state_at(tz, at).0 != state {
            return at;
        }
    }
    after
}

/// UTC offset as `+HHMM`, with seconds appended only when present.
fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    let (hours, minutes, secs) = (abs / 3600, abs % 3600 / 60, abs % 60);

    if secs == 0 {
        format!("{sign}{hours:02}{minutes:02}")
    } else {
        format!("{sign}{hours:02}{minutes:02}{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2024, 11, 10, 20, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 11, 16, 4, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_auckland_transitions() {
        let (from, until) = window();

        let block = vtimezone(chrono_tz::Pacific::Auckland, from, until);

        assert!(
            block.starts_with("BEGIN:VTIMEZONE\r\nTZID:Pacific/Auckland\r\n"),
            "{block}"
        );
        assert!(block.ends_with("END:VTIMEZONE\r\n"));
        assert!(
            block.contains(
                "BEGIN:STANDARD\r\nDTSTART:20240407T030000\r\n\
                 TZOFFSETFROM:+1300\r\nTZOFFSETTO:+1200\r\n"
            ),
            "April fall-back missing:\n{block}"
        );
        assert!(
            block.contains(
                "BEGIN:DAYLIGHT\r\nDTSTART:20240929T020000\r\n\
                 TZOFFSETFROM:+1200\r\nTZOFFSETTO:+1300\r\n"
            ),
            "September spring-forward missing:\n{block}"
        );
        assert!(block.contains("DTSTART:20250928T020000"));
    }

    #[test]
    fn test_first_observance_is_state_at_window_start() {
        let (from, until) = window();
        let start = from - Duration::days(MARGIN_DAYS);

        let list = observances(chrono_tz::Pacific::Auckland, start, until);

        // Mid-November 2023 is daylight time in New Zealand
        assert!(list[0].daylight);
        assert_eq!(list[0].offset_from, 13 * 3600);
        assert_eq!(list[0].offset_to, 13 * 3600);
        assert_eq!(list[0].name.as_deref(), Some("NZDT"));
        assert_eq!(list.len(), 3, "two changes up to Nov 2024: {list:?}");
    }

    #[test]
    fn test_zone_without_changes() {
        let (from, until) = window();

        let block = vtimezone(chrono_tz::UTC, from, until);

        assert_eq!(block.matches("BEGIN:STANDARD").count(), 1);
        assert!(!block.contains("DAYLIGHT"));
        assert!(block.contains("TZOFFSETFROM:+0000\r\nTZOFFSETTO:+0000\r\n"));
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(13 * 3600), "+1300");
        assert_eq!(format_offset(-(3 * 3600 + 30 * 60)), "-0330");
        assert_eq!(format_offset(0), "+0000");
        assert_eq!(format_offset(45 * 60 + 5), "+004505");
    }
}
