//! Observability for harness runs
//!
//! - Structured logging (JSON lines on stderr)
//! - Run counters
//! - Lifecycle event tracing
//!
//! Observability is read-only: nothing here changes what a run checks or
//! whether it passes.
//!
//! ```ignore
//! use permcheck::observability::{Logger, Event, HarnessMetrics, ObservationScope};
//!
//! Logger::info("RUN_BEGIN", &[("rows", "5")]);
//!
//! let metrics = HarnessMetrics::new();
//! metrics.increment_fetches();
//!
//! let scope = ObservationScope::new("PAIR");
//! scope.complete();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{HarnessMetrics, MetricsSnapshot};
pub use scope::ObservationScope;

fn event_severity(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_detail() {
        Severity::Trace
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event_severity(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_severity_mapping() {
        assert_eq!(event_severity(Event::AssertionFailed), Severity::Fatal);
        assert_eq!(event_severity(Event::FetchIssued), Severity::Trace);
        assert_eq!(event_severity(Event::SessionOpened), Severity::Info);
    }

    #[test]
    fn test_log_event() {
        log_event(Event::RunStart);
        log_event_with_fields(Event::ConfigLoaded, &[("dsn", "memory")]);
    }
}
