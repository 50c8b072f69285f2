//! Observability for the note service
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle and store events
//! - Counter metrics
//!
//! ```ignore
//! use notedb::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::NoteStored, &[("id", "a1")]);
//! log_event_with_fields(Event::NotesLoaded, &[("count", "3")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

fn severity_for(event: Event) -> Severity {
    if event.is_error() {
        Severity::Error
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Error events go to stderr, everything else to stdout.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    match severity_for(event) {
        Severity::Error => Logger::log_stderr(Severity::Error, event.as_str(), fields),
        severity => Logger::log(severity, event.as_str(), fields),
    }
}
