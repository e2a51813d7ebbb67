//! Idle-gap analysis between consecutive events.

use crate::types::{CalendarEvent, GapSummary};

/// Gaps shorter than this (but positive) fragment the day.
const SHORT_GAP_MINUTES: f64 = 30.0;

/// Gaps at least this long are usable blocks in their own right.
const LONG_GAP_MINUTES: f64 = 120.0;

/// Count short and long idle gaps between consecutive events.
///
/// Sorting is this function's responsibility: it orders a private copy by
/// start time (stable) and leaves the caller's slice untouched, so feeding
/// any permutation of the same events yields the same summary.
///
/// Overlapping and back-to-back events (gap <= 0) are ignored by both
/// counters, as are gaps in the [30, 120) minute band.
pub fn analyze_gaps(events: &[CalendarEvent]) -> GapSummary {
    let mut ordered: Vec<&CalendarEvent> = events.iter().collect();
    ordered.sort_by_key(|e| e.start);

    let mut summary = GapSummary::default();

    for pair in ordered.windows(2) {
        let gap_minutes =
            pair[1].start.signed_duration_since(pair[0].end).num_seconds() as f64 / 60.0;

        if gap_minutes > 0.0 && gap_minutes < SHORT_GAP_MINUTES {
            summary.short_gaps += 1;
        } else if gap_minutes >= LONG_GAP_MINUTES {
            summary.long_gaps += 1;
        }
    }

    summary
}
