//! Calendar event sources.
//!
//! The analytics never talk to a calendar backend directly; they consume an
//! ordered event list obtained from an [`EventSource`]. The bundled
//! [`StaticEventSource`] serves a fixed in-memory list and is what the
//! dashboard ships with until a real provider (Google Calendar, Outlook,
//! CalDAV) is wired in behind the same trait.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::Result;
use crate::types::{CalendarEvent, EventCategory, EventStatus, Priority};

/// Supplies an ordered sequence of calendar events for a time range.
///
/// Implementations must return events sorted ascending by start time and
/// must only hand out events that satisfy the `end > start` invariant.
pub trait EventSource: Send + Sync {
    /// Events whose start falls within `[from, to)`, sorted by start time.
    fn events_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>>;
}

/// In-memory event source backed by a fixed list.
pub struct StaticEventSource {
    events: Vec<CalendarEvent>,
}

impl StaticEventSource {
    /// Create a source from a list of events.
    ///
    /// Every event is validated on the way in; a malformed event
    /// (end at or before start) fails construction rather than surfacing
    /// later as a corrupted aggregate.
    pub fn new(events: Vec<CalendarEvent>) -> Result<Self> {
        for event in &events {
            event.validate()?;
        }
        Ok(Self { events })
    }

    /// Source preloaded with the bundled sample week.
    pub fn sample() -> Self {
        // Sample data is statically well-formed
        Self::new(sample_calendar_events()).unwrap()
    }

    /// All events held by this source, sorted by start time.
    pub fn all_events(&self) -> Vec<CalendarEvent> {
        let mut events = self.events.clone();
        events.sort_by_key(|e| e.start);
        events
    }
}

impl EventSource for StaticEventSource {
    fn events_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        let mut events: Vec<CalendarEvent> = self
            .events
            .iter()
            .filter(|e| e.start >= from && e.start < to)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start);
        Ok(events)
    }
}

/// The bundled sample week: three working days in June 2024.
///
/// Stands in for a real calendar provider during development and demos.
pub fn sample_calendar_events() -> Vec<CalendarEvent> {
    fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        // Fixed, known-valid sample dates
        Utc.with_ymd_and_hms(2024, 6, day, hour, min, 0).unwrap()
    }

    vec![
        CalendarEvent {
            id: "1".to_string(),
            title: "Daily Standup".to_string(),
            start: at(10, 9, 0),
            end: at(10, 9, 30),
            attendees: vec!["team@startup.com".to_string()],
            category: EventCategory::Standup,
            location: None,
            recurring: true,
            priority: Priority::Medium,
            status: EventStatus::Confirmed,
        },
        CalendarEvent {
            id: "2".to_string(),
            title: "Product Strategy Review".to_string(),
            start: at(10, 14, 0),
            end: at(10, 15, 30),
            attendees: vec![
                "sarah@startup.com".to_string(),
                "mike@startup.com".to_string(),
                "alex@startup.com".to_string(),
            ],
            category: EventCategory::Review,
            location: None,
            recurring: false,
            priority: Priority::High,
            status: EventStatus::Confirmed,
        },
        CalendarEvent {
            id: "3".to_string(),
            title: "Client Call - TechCorp".to_string(),
            start: at(10, 16, 0),
            end: at(10, 17, 0),
            attendees: vec!["client@techcorp.com".to_string()],
            category: EventCategory::Call,
            location: None,
            recurring: false,
            priority: Priority::High,
            status: EventStatus::Confirmed,
        },
        CalendarEvent {
            id: "4".to_string(),
            title: "Weekly Team Sync".to_string(),
            start: at(11, 10, 0),
            end: at(11, 11, 0),
            attendees: vec!["team@startup.com".to_string()],
            category: EventCategory::Meeting,
            location: None,
            recurring: true,
            priority: Priority::Medium,
            status: EventStatus::Confirmed,
        },
        CalendarEvent {
            id: "5".to_string(),
            title: "Investor Update Meeting".to_string(),
            start: at(11, 15, 0),
            end: at(11, 16, 0),
            attendees: vec!["investor@vc.com".to_string()],
            category: EventCategory::Meeting,
            location: None,
            recurring: false,
            priority: Priority::High,
            status: EventStatus::Confirmed,
        },
        CalendarEvent {
            id: "6".to_string(),
            title: "Engineering Deep Dive".to_string(),
            start: at(12, 13, 0),
            end: at(12, 15, 0),
            attendees: vec!["dev-team@startup.com".to_string()],
            category: EventCategory::Workshop,
            location: None,
            recurring: false,
            priority: Priority::Medium,
            status: EventStatus::Confirmed,
        },
        CalendarEvent {
            id: "7".to_string(),
            title: "Candidate Interview".to_string(),
            start: at(12, 11, 0),
            end: at(12, 12, 0),
            attendees: vec!["hr@startup.com".to_string()],
            category: EventCategory::Interview,
            location: None,
            recurring: false,
            priority: Priority::High,
            status: EventStatus::Confirmed,
        },
    ]
}
