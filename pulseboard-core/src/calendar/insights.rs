//! Rule-based productivity insights.
//!
//! A fixed, ordered list of independent rules is evaluated against the
//! aggregated analytics and the raw event list. Each rule emits zero or one
//! insight; the first four to fire are returned in rule order, never
//! re-sorted. Thresholds, descriptions, time-saved estimates, and action
//! checklists are configuration constants, not computed values.

use chrono::Timelike;

use crate::calendar::gaps::analyze_gaps;
use crate::types::{CalendarEvent, Impact, InsightCategory, ProductivityInsight, TimeAnalytics};

/// Cap on the number of insights returned per call.
const MAX_INSIGHTS: usize = 4;

/// More recurring meetings than this triggers the consolidation rule.
const RECURRING_MEETING_THRESHOLD: usize = 3;

/// More over-90-minute meetings than this triggers the long-meeting rule.
const LONG_MEETING_THRESHOLD: usize = 2;
const LONG_MEETING_MINUTES: f64 = 90.0;

/// Weekly focus hours below this trigger the deep-work rule.
const FOCUS_HOURS_FLOOR: f64 = 20.0;

/// More sub-30-minute gaps than this triggers the scheduling rule.
const SHORT_GAP_THRESHOLD: usize = 3;

/// Meetings starting before this hour count as morning load.
const MORNING_END_HOUR: u32 = 10;
/// Meetings starting at or after this hour count as afternoon load.
const AFTERNOON_START_HOUR: u32 = 14;
/// Morning load beyond this multiple of afternoon load triggers the rule.
const MORNING_SKEW_RATIO: f64 = 1.5;

/// Evaluate the insight rules against a set of events and their analytics.
///
/// Deterministic and pure: the same input always produces the same ordered
/// list. At most [`MAX_INSIGHTS`] entries are returned.
pub fn generate_insights(
    events: &[CalendarEvent],
    analytics: &TimeAnalytics,
) -> Vec<ProductivityInsight> {
    let mut insights: Vec<ProductivityInsight> = [
        recurring_meetings_rule(events),
        long_meetings_rule(events),
        focus_time_rule(analytics),
        fragmented_schedule_rule(events),
        morning_load_rule(events),
    ]
    .into_iter()
    .flatten()
    .collect();

    insights.truncate(MAX_INSIGHTS);

    tracing::debug!(
        events = events.len(),
        insights = insights.len(),
        "Generated productivity insights"
    );

    insights
}

fn recurring_meetings_rule(events: &[CalendarEvent]) -> Option<ProductivityInsight> {
    let recurring = events.iter().filter(|e| e.recurring).count();
    if recurring <= RECURRING_MEETING_THRESHOLD {
        return None;
    }

    Some(ProductivityInsight {
        category: InsightCategory::MeetingReduction,
        title: "Reduce Recurring Meetings".to_string(),
        description: format!(
            "You have {} recurring meetings. Consider consolidating or reducing frequency.",
            recurring
        ),
        impact: Impact::High,
        time_saved: "2-4 hours/week".to_string(),
        action_items: vec![
            "Audit all recurring meetings for necessity".to_string(),
            "Combine similar meetings into one session".to_string(),
            "Switch some meetings to async updates".to_string(),
            "Reduce meeting frequency from weekly to bi-weekly".to_string(),
        ],
    })
}

fn long_meetings_rule(events: &[CalendarEvent]) -> Option<ProductivityInsight> {
    let long = events
        .iter()
        .filter(|e| e.duration_minutes() > LONG_MEETING_MINUTES)
        .count();
    if long <= LONG_MEETING_THRESHOLD {
        return None;
    }

    Some(ProductivityInsight {
        category: InsightCategory::MeetingReduction,
        title: "Optimize Long Meetings".to_string(),
        description: format!(
            "{} meetings are over 90 minutes. Break them down for better focus.",
            long
        ),
        impact: Impact::Medium,
        time_saved: "1-2 hours/week".to_string(),
        action_items: vec![
            "Set strict agendas for long meetings".to_string(),
            "Break 2+ hour meetings into multiple sessions".to_string(),
            "Use timeboxing for each agenda item".to_string(),
            "End meetings early when objectives are met".to_string(),
        ],
    })
}

fn focus_time_rule(analytics: &TimeAnalytics) -> Option<ProductivityInsight> {
    if analytics.focus_time_hours >= FOCUS_HOURS_FLOOR {
        return None;
    }

    Some(ProductivityInsight {
        category: InsightCategory::FocusTime,
        title: "Increase Deep Work Time".to_string(),
        description: format!(
            "Only {} hours of focus time this week. Aim for 25+ hours.",
            analytics.focus_time_hours
        ),
        impact: Impact::High,
        time_saved: "5+ hours/week".to_string(),
        action_items: vec![
            "Block 2-4 hour focus time slots daily".to_string(),
            "Decline non-essential meetings".to_string(),
            "Use 'Do Not Disturb' during focus blocks".to_string(),
            "Batch similar meetings together".to_string(),
        ],
    })
}

fn fragmented_schedule_rule(events: &[CalendarEvent]) -> Option<ProductivityInsight> {
    let gaps = analyze_gaps(events);
    if gaps.short_gaps <= SHORT_GAP_THRESHOLD {
        return None;
    }

    Some(ProductivityInsight {
        category: InsightCategory::TimeBlock,
        title: "Optimize Meeting Scheduling".to_string(),
        description: format!(
            "{} gaps under 30 minutes between meetings reduce productivity.",
            gaps.short_gaps
        ),
        impact: Impact::Medium,
        time_saved: "30-60 minutes/day".to_string(),
        action_items: vec![
            "Schedule meetings back-to-back when possible".to_string(),
            "Leave 15-minute buffers between meetings".to_string(),
            "Group meetings by type or topic".to_string(),
            "Use calendar blocking for transition time".to_string(),
        ],
    })
}

fn morning_load_rule(events: &[CalendarEvent]) -> Option<ProductivityInsight> {
    let morning = events
        .iter()
        .filter(|e| e.start.hour() < MORNING_END_HOUR)
        .count();
    let afternoon = events
        .iter()
        .filter(|e| e.start.hour() >= AFTERNOON_START_HOUR)
        .count();

    if morning as f64 <= afternoon as f64 * MORNING_SKEW_RATIO {
        return None;
    }

    Some(ProductivityInsight {
        category: InsightCategory::Scheduling,
        title: "Protect Morning Focus Time".to_string(),
        description: "Too many morning meetings. Mornings are typically most productive for deep work."
            .to_string(),
        impact: Impact::High,
        time_saved: "2-3 hours/day".to_string(),
        action_items: vec![
            "Move routine meetings to afternoons".to_string(),
            "Block 9-11 AM for deep work".to_string(),
            "Schedule creative work in the morning".to_string(),
            "Use afternoons for collaborative meetings".to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::analytics::analyze_time_usage;
    use crate::calendar::provider::sample_calendar_events;
    use crate::types::{EventCategory, EventStatus, Priority};
    use chrono::{DateTime, TimeZone, Utc};

    fn event(
        id: &str,
        start: DateTime<Utc>,
        minutes: i64,
        recurring: bool,
    ) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: format!("Event {}", id),
            start,
            end: start + chrono::Duration::minutes(minutes),
            attendees: vec![],
            category: EventCategory::Meeting,
            location: None,
            recurring,
            priority: Priority::Medium,
            status: EventStatus::Confirmed,
        }
    }

    fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, min, 0).unwrap()
    }

    #[test]
    fn test_sample_week_fires_only_focus_rule() {
        let events = sample_calendar_events();
        let analytics = analyze_time_usage(&events).unwrap();
        let insights = generate_insights(&events, &analytics);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Increase Deep Work Time");
        assert_eq!(insights[0].category, InsightCategory::FocusTime);
        assert_eq!(insights[0].impact, Impact::High);
        assert!(insights[0].description.contains("16"));
    }

    #[test]
    fn test_insights_are_capped_at_four() {
        // A pathological week that trips every rule: recurring 2.5h morning
        // blocks packed with sub-30-minute gaps, five days running.
        let mut events = Vec::new();
        for day in 10..15 {
            events.push(event(&format!("a{}", day), at(day, 7, 0), 150, true));
            events.push(event(&format!("b{}", day), at(day, 9, 40), 150, false));
        }

        let analytics = analyze_time_usage(&events).unwrap();
        let insights = generate_insights(&events, &analytics);

        assert_eq!(insights.len(), MAX_INSIGHTS);
        // Rule order is preserved, never re-sorted by impact
        assert_eq!(insights[0].title, "Reduce Recurring Meetings");
        assert_eq!(insights[1].title, "Optimize Long Meetings");
        assert_eq!(insights[2].title, "Increase Deep Work Time");
        assert_eq!(insights[3].title, "Optimize Meeting Scheduling");
    }

    #[test]
    fn test_no_rule_fires_on_a_light_week() {
        // Three short afternoon meetings on separate days leave plenty of
        // focus time and trip nothing.
        let events = vec![
            event("a", at(10, 14, 0), 25, false),
            event("b", at(11, 15, 0), 25, false),
            event("c", at(12, 15, 0), 25, false),
        ];

        let analytics = analyze_time_usage(&events).unwrap();
        assert!(generate_insights(&events, &analytics).is_empty());
    }

    #[test]
    fn test_morning_skew_rule() {
        // Three morning meetings against one afternoon meeting: 3 > 1.5.
        let events = vec![
            event("a", at(10, 8, 0), 30, false),
            event("b", at(11, 8, 0), 30, false),
            event("c", at(12, 8, 0), 30, false),
            event("d", at(12, 15, 0), 30, false),
            // Spread across enough days that the focus rule stays quiet
            event("e", at(13, 12, 0), 30, false),
            event("f", at(14, 12, 0), 30, false),
        ];

        let analytics = analyze_time_usage(&events).unwrap();
        let insights = generate_insights(&events, &analytics);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Protect Morning Focus Time");
    }

    #[test]
    fn test_recurring_rule_threshold_is_strict() {
        // Exactly three recurring meetings does not fire the rule.
        let events: Vec<CalendarEvent> = (0..3)
            .map(|i| event(&i.to_string(), at(10 + i, 14, 0), 30, true))
            .collect();

        let analytics = analyze_time_usage(&events).unwrap();
        let insights = generate_insights(&events, &analytics);
        assert!(insights
            .iter()
            .all(|i| i.title != "Reduce Recurring Meetings"));
    }
}
