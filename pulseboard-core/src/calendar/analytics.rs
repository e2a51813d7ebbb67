//! Time-usage aggregation.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::Timelike;

use crate::error::{Error, Result};
use crate::format::{format_hour_slot, round1};
use crate::types::{CalendarEvent, TimeAnalytics};

/// Assumed daily capacity when inferring focus time.
const WORKING_HOURS_PER_DAY: f64 = 8.0;

/// Events longer than this count against the efficiency score.
const LONG_MEETING_MINUTES: f64 = 90.0;

/// Events at or under this count toward the efficiency score.
const SHORT_MEETING_MINUTES: f64 = 30.0;

/// Number of least-booked hour slots to report.
const PRODUCTIVE_HOURS_REPORTED: usize = 3;

/// Aggregate a set of calendar events into [`TimeAnalytics`].
///
/// Single pass over the list plus an hour-of-day histogram. The input must
/// be non-empty and well-formed; an empty list or an event with a
/// non-positive duration fails with [`Error::InvalidInput`] rather than
/// producing division-by-zero artifacts.
///
/// Focus time may come out negative when the meeting load exceeds the
/// assumed 8h/day capacity; that is reported as-is.
pub fn analyze_time_usage(events: &[CalendarEvent]) -> Result<TimeAnalytics> {
    if events.is_empty() {
        return Err(Error::InvalidInput(
            "cannot analyze an empty event list".to_string(),
        ));
    }
    for event in events {
        event.validate()?;
    }

    let mut total_minutes = 0.0;
    let mut days = BTreeSet::new();
    let mut hour_counts: BTreeMap<u32, usize> = BTreeMap::new();
    let mut long_meetings = 0i64;
    let mut short_meetings = 0i64;
    let mut recurring_meetings = 0i64;

    for event in events {
        let minutes = event.duration_minutes();
        total_minutes += minutes;
        days.insert(event.start.date_naive());
        *hour_counts.entry(event.start.hour()).or_insert(0) += 1;

        if minutes > LONG_MEETING_MINUTES {
            long_meetings += 1;
        }
        if minutes <= SHORT_MEETING_MINUTES {
            short_meetings += 1;
        }
        if event.recurring {
            recurring_meetings += 1;
        }
    }

    let total_hours = total_minutes / 60.0;
    let event_count = events.len() as f64;
    let day_count = days.len() as f64;
    let focus_hours = day_count * WORKING_HOURS_PER_DAY - total_hours;

    // Least-booked hours: BTreeMap iteration is ascending by hour, and the
    // sort below is stable, so ties resolve to the earlier hour.
    let mut by_count: Vec<(u32, usize)> = hour_counts.into_iter().collect();
    by_count.sort_by_key(|&(_, count)| count);
    let most_productive_hours = by_count
        .iter()
        .take(PRODUCTIVE_HOURS_REPORTED)
        .map(|&(hour, _)| format_hour_slot(hour))
        .collect();

    // Floored at 0; deliberately never capped at 100.
    let efficiency_score =
        (100 - long_meetings * 10 - recurring_meetings * 5 + short_meetings * 5).max(0);

    tracing::debug!(
        events = events.len(),
        days = days.len(),
        total_hours,
        efficiency_score,
        "Computed time-usage analytics"
    );

    Ok(TimeAnalytics {
        total_meeting_hours: round1(total_hours),
        average_meeting_minutes: round1(total_minutes / event_count),
        meetings_per_day: round1(event_count / day_count),
        focus_time_hours: round1(focus_hours),
        most_productive_hours,
        efficiency_score,
    })
}
