//! Observability subsystem
//!
//! Structured JSON logging of typed events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on planning or execution results
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use scanbridge::observability::{log_event_with_fields, Event, Logger};
//!
//! log_event_with_fields(Event::PushdownApplied, &[("dataset", "sales")]);
//!
//! let ((), lines) = Logger::capture(|| log_event(Event::CollectBegin));
//! assert_eq!(lines.len(), 1);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
