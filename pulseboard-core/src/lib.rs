//! # pulseboard-core
//!
//! Core library for pulseboard - a startup metrics dashboard.
//!
//! This library provides:
//! - Domain types for calendar events and business metrics
//! - Calendar productivity analytics (time usage, gaps, insights, distribution)
//! - An AI advisor: prompt assembly and a streaming chat relay
//! - CSV and PDF report export
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! The analytics core is pure and synchronous: events flow in from an
//! [`calendar::EventSource`], every entry point recomputes its result from
//! the supplied list, and nothing is persisted. The only I/O-bound path is
//! the advisor relay, which forwards a conversation turn to a hosted model
//! and streams the reply back verbatim.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pulseboard_core::calendar::{analyze_time_usage, generate_insights, StaticEventSource};
//!
//! let events = StaticEventSource::sample().all_events();
//! let analytics = analyze_time_usage(&events).expect("non-empty event list");
//! let insights = generate_insights(&events, &analytics);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod advisor;
pub mod business;
pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod types;
