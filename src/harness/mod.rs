//! Harness orchestration
//!
//! Resolves configuration, owns the storage session for the length of a
//! run, and drives the ten regime pairs through the assertion matrix.
//!
//! # Exit paths
//!
//! - Precondition and config errors: before the session is opened
//! - Assertion failures and storage errors: session released by its guard
//! - Success: session closed explicitly, [`RunReport`] returned

mod config;
mod errors;
mod orchestrator;
mod report;

pub use config::{
    ConfigOverrides, HarnessConfig, DEFAULT_DIMENSION, DEFAULT_MAX_RESAMPLES, MAX_RESAMPLES_LIMIT,
};
pub use errors::{HarnessError, HarnessResult, EXIT_ASSERTION, EXIT_PRECONDITION, EXIT_STORAGE};
pub use orchestrator::Orchestrator;
pub use report::{PairOutcome, RunReport};
