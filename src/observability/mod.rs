//! Observability for the whitelist engine
//!
//! - Structured logs (JSON), one line per event
//! - `event` key first, remaining fields in sorted order
//! - Explicit severity levels
//! - Synchronous, no buffering, no background threads
//!
//! Observability is read-only: a logging failure never affects engine
//! execution.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at INFO with fields.
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(Severity::Info, event.as_str(), fields);
}
