//! Calendar analytics for pulseboard
//!
//! Provides productivity analysis over calendar events:
//! - Time-usage aggregation (meeting load, focus time, efficiency score)
//! - Idle-gap analysis between consecutive events
//! - Rule-based productivity insights
//! - Event-category distribution
//!
//! All analysis is pure and synchronous: a fresh result is computed from the
//! supplied event list on every call, with no shared state between callers.
//! Events come in through the [`EventSource`] seam so a real calendar
//! provider can replace the bundled fixture without touching the analytics.

pub mod analytics;
pub mod distribution;
pub mod gaps;
pub mod insights;
pub mod provider;

pub use analytics::analyze_time_usage;
pub use distribution::category_distribution;
pub use gaps::analyze_gaps;
pub use insights::generate_insights;
pub use provider::{sample_calendar_events, EventSource, StaticEventSource};
