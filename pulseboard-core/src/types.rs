//! Core domain types for pulseboard
//!
//! These types model the calendar side of the dashboard: the events supplied
//! by a calendar provider and the derived analytics computed from them.
//! All timestamps are `DateTime<Utc>`; the analytics are timezone-neutral
//! and bucket by UTC calendar date and UTC hour.
//!
//! Derived values ([`TimeAnalytics`], [`ProductivityInsight`],
//! [`CategoryShare`]) are recomputed on every analysis call and carry no
//! identity of their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================
// Calendar events
// ============================================

/// Category of a calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Meeting,
    Call,
    Workshop,
    Review,
    Standup,
    Interview,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "meeting",
            EventCategory::Call => "call",
            EventCategory::Workshop => "workshop",
            EventCategory::Review => "review",
            EventCategory::Standup => "standup",
            EventCategory::Interview => "interview",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "meeting" => Ok(EventCategory::Meeting),
            "call" => Ok(EventCategory::Call),
            "workshop" => Ok(EventCategory::Workshop),
            "review" => Ok(EventCategory::Review),
            "standup" => Ok(EventCategory::Standup),
            "interview" => Ok(EventCategory::Interview),
            _ => Err(format!("unknown event category: {}", s)),
        }
    }
}

/// Priority assigned to an event by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("unknown priority: {}", s)),
        }
    }
}

/// Confirmation status of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "confirmed",
            EventStatus::Tentative => "tentative",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(EventStatus::Confirmed),
            "tentative" => Ok(EventStatus::Tentative),
            "cancelled" => Ok(EventStatus::Cancelled),
            _ => Err(format!("unknown event status: {}", s)),
        }
    }
}

/// A scheduled calendar event supplied by a provider.
///
/// Immutable once constructed; `end` is strictly after `start`, enforced by
/// [`CalendarEvent::validate`] at ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Unique identifier from the provider
    pub id: String,
    /// Human-readable title
    pub title: String,
    /// When the event starts
    pub start: DateTime<Utc>,
    /// When the event ends (strictly after `start`)
    pub end: DateTime<Utc>,
    /// Attendee identifiers (may be empty)
    pub attendees: Vec<String>,
    /// Event category
    pub category: EventCategory,
    /// Optional location
    pub location: Option<String>,
    /// Whether this event repeats on a schedule
    pub recurring: bool,
    /// Priority assigned by the provider
    pub priority: Priority,
    /// Confirmation status
    pub status: EventStatus,
}

impl CalendarEvent {
    /// Check the `end > start` invariant.
    ///
    /// Ingestion surfaces must call this before handing events to the
    /// analytics; a negative duration would silently corrupt aggregates.
    pub fn validate(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(Error::InvalidInput(format!(
                "event {}: end ({}) must be after start ({})",
                self.id, self.end, self.start
            )));
        }
        Ok(())
    }

    /// Event duration in whole-and-fractional minutes.
    pub fn duration_minutes(&self) -> f64 {
        self.end.signed_duration_since(self.start).num_seconds() as f64 / 60.0
    }
}

// ============================================
// Derived analytics
// ============================================

/// Aggregated time-usage analytics for a set of events.
///
/// Recomputed from scratch on every call; not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAnalytics {
    /// Total scheduled hours, rounded to one decimal
    pub total_meeting_hours: f64,
    /// Average event duration in minutes, rounded to one decimal
    pub average_meeting_minutes: f64,
    /// Events per distinct calendar day, rounded to one decimal
    pub meetings_per_day: f64,
    /// Unscheduled hours against an 8h/day capacity, one decimal.
    /// Negative when meeting load exceeds capacity; callers treat that as a
    /// signal, not an error.
    pub focus_time_hours: f64,
    /// The three least-booked hour slots, formatted "H:00",
    /// ties broken by ascending hour
    pub most_productive_hours: Vec<String>,
    /// Meeting-pattern health score, floored at 0 and deliberately
    /// not capped at 100
    pub efficiency_score: i64,
}

/// Category tag attached to a productivity insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightCategory {
    TimeBlock,
    MeetingReduction,
    FocusTime,
    Scheduling,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::TimeBlock => "time-block",
            InsightCategory::MeetingReduction => "meeting-reduction",
            InsightCategory::FocusTime => "focus-time",
            InsightCategory::Scheduling => "scheduling",
        }
    }
}

/// Expected impact of acting on an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

/// An advisory insight produced by the rule engine.
///
/// Generated transiently per analysis call; at most four are returned, in
/// rule evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductivityInsight {
    /// Which family of advice this belongs to
    pub category: InsightCategory,
    /// Short headline
    pub title: String,
    /// Template populated with the triggering counts
    pub description: String,
    /// Expected impact of acting on it
    pub impact: Impact,
    /// Fixed, human-readable time-saved estimate
    pub time_saved: String,
    /// Fixed action checklist
    pub action_items: Vec<String>,
}

/// Counts of idle gaps between consecutive events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapSummary {
    /// Gaps strictly between 0 and 30 minutes
    pub short_gaps: usize,
    /// Gaps of 120 minutes or more
    pub long_gaps: usize,
}

/// Share of one event category within a set of events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Event category
    pub category: EventCategory,
    /// Number of events in this category
    pub count: usize,
    /// round(100 * count / total); rounded independently per category,
    /// so shares need not sum to exactly 100
    pub percentage: u32,
}
