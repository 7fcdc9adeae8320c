//! Turns one employee's roster row into calendar events.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::error::SkipReason;
use crate::event::{CalendarDocument, CalendarEvent, DEFAULT_PROD_ID, DEFAULT_TIMEZONE};
use crate::grid::Grid;
use crate::shift::{self, ShiftInterval};
use crate::week::DayInfo;

/// Summary label used when a shift has no task.
const DEFAULT_TASK_LABEL: &str = "Work";

/// Domain suffix of generated event UIDs.
const UID_DOMAIN: &str = "roster-ical";

/// Settings for event generation.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Zone every shift time is localized to.
    pub timezone: Tz,
    pub prod_id: String,
    /// Seeds stable event UIDs; usually the employee's name.
    pub uid_seed: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            timezone: DEFAULT_TIMEZONE,
            prod_id: DEFAULT_PROD_ID.to_string(),
            uid_seed: String::new(),
        }
    }
}

/// A day that produced no event, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDay {
    pub day: DayInfo,
    pub reason: SkipReason,
}

/// Events generated for one employee plus the days that were skipped.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub document: CalendarDocument,
    pub skipped: Vec<SkippedDay>,
}

/// Build calendar events for the employee at `employee_row`, one per day
/// with a complete shift, in day order.
pub fn build(grid: &Grid, employee_row: usize, days: &[DayInfo], options: &BuildOptions) -> BuildOutcome {
    let mut document = CalendarDocument::new(options.prod_id.clone());
    let mut skipped = Vec::new();

    for day in days {
        let result = shift::extract(grid, employee_row, day.column)
            .and_then(|shift| shift.ok_or(SkipReason::NoShift))
            .and_then(|shift| build_event(day, &shift, options));

        match result {
            Ok(event) => {
                tracing::debug!(
                    date = %format!("{}-{:02}-{:02}", day.year, day.month, day.day),
                    summary = %event.summary,
                    "Added shift event"
                );
                document.events.push(event);
            }
            Err(reason) => {
                if reason == SkipReason::NoShift {
                    tracing::debug!(weekday = %day.weekday, "No shift scheduled");
                } else {
                    tracing::warn!(
                        weekday = %day.weekday,
                        day = day.day,
                        month = day.month,
                        %reason,
                        "Skipping day"
                    );
                }
                skipped.push(SkippedDay {
                    day: day.clone(),
                    reason,
                });
            }
        }
    }

    BuildOutcome { document, skipped }
}

fn build_event(day: &DayInfo, shift: &ShiftInterval, options: &BuildOptions) -> Result<CalendarEvent, SkipReason> {
    let date = day.date().ok_or(SkipReason::InvalidDate {
        year: day.year,
        month: day.month,
        day: day.day,
    })?;

    let start_naive = date.and_time(shift.start);
    let mut end_naive = date.and_time(shift.end);
    // Shifts that do not end after they start run past midnight
    if shift.end <= shift.start {
        end_naive += Duration::days(1);
    }

    let start = localize(options.timezone, start_naive)?;
    let end = localize(options.timezone, end_naive)?;

    let label = if shift.task.is_empty() {
        DEFAULT_TASK_LABEL
    } else {
        shift.task.as_str()
    };

    Ok(CalendarEvent {
        uid: event_uid(&options.uid_seed, &start_naive, &end_naive),
        summary: format!("{label} {}-{}", shift.start.hour(), shift.end.hour()),
        description: format!("Task: {}", shift.task),
        start,
        end,
    })
}

/// Attach the zone; ambiguous (DST fall-back) times take the earlier offset.
fn localize(tz: Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>, SkipReason> {
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| SkipReason::NonexistentLocalTime(naive.to_string(), tz.name().to_string()))
}

/// Name-based UID so re-exporting the same shift yields the same event.
fn event_uid(seed: &str, start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    let key = format!("{seed}|{start}|{end}");
    let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes());
    format!("{id}@{UID_DOMAIN}")
}
