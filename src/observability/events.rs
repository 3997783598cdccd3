//! Observable events for a harness run
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in a permcheck run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Run begins
    RunStart,
    /// All pairs checked, session released
    RunComplete,
    /// Run aborted by a fatal error
    RunFailed,

    // Configuration
    /// Configuration resolved (file + CLI overrides)
    ConfigLoaded,

    // Session
    /// Storage session acquired
    SessionOpened,
    /// Storage session released
    SessionClosed,

    // Dataset
    /// Canonical dataset created and bulk-inserted
    DatasetMaterialized,

    // Fetch / compare
    /// A ResultSource fetch was issued
    FetchIssued,
    /// A randomized fetch collided with its counterpart and was redrawn
    PairResampled,
    /// A comparator result did not match the expected vector
    AssertionFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RunStart => "RUN_BEGIN",
            Event::RunComplete => "RUN_COMPLETE",
            Event::RunFailed => "RUN_FAILED",

            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::SessionOpened => "SESSION_OPENED",
            Event::SessionClosed => "SESSION_CLOSED",

            Event::DatasetMaterialized => "DATASET_MATERIALIZED",

            Event::FetchIssued => "FETCH_ISSUED",
            Event::PairResampled => "PAIR_RESAMPLED",
            Event::AssertionFailed => "ASSERTION_FAILED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::RunFailed | Event::AssertionFailed)
    }

    /// Returns true if the event is per-fetch detail
    pub fn is_detail(&self) -> bool {
        matches!(self, Event::FetchIssued)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
