//! # Harness Errors
//!
//! Every way a run can end early. All of them are fatal: the run stops at
//! the first one and nothing is retried.

use thiserror::Error;

use crate::dataset::PreconditionError;
use crate::engine::EngineError;
use crate::matrix::AssertionFailure;

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Exit code for an invalid shape or configuration
pub const EXIT_PRECONDITION: i32 = 2;
/// Exit code for a failed assertion
pub const EXIT_ASSERTION: i32 = 3;
/// Exit code for a storage failure
pub const EXIT_STORAGE: i32 = 4;

/// Harness errors
#[derive(Debug, Clone, Error)]
pub enum HarnessError {
    // ==================
    // Before any I/O
    // ==================

    /// Row or column count is invalid
    #[error("{0}")]
    Precondition(#[from] PreconditionError),

    /// Configuration could not be read or failed validation
    #[error("[FATAL] PERM_CONFIG: {0}")]
    Config(String),

    // ==================
    // During the run
    // ==================

    /// A comparator outcome did not match the expected vector
    #[error("{0}")]
    Assertion(#[from] Box<AssertionFailure>),

    /// The storage session failed
    #[error("[FATAL] PERM_STORAGE_IO: {0}")]
    Storage(#[from] EngineError),
}

impl HarnessError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Precondition(_) => "PERM_PRECONDITION",
            Self::Config(_) => "PERM_CONFIG",
            Self::Assertion(_) => AssertionFailure::CODE,
            Self::Storage(_) => "PERM_STORAGE_IO",
        }
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Precondition(_) | Self::Config(_) => EXIT_PRECONDITION,
            Self::Assertion(_) => EXIT_ASSERTION,
            Self::Storage(_) => EXIT_STORAGE,
        }
    }

    /// True for errors raised before the session is opened
    pub fn is_pre_io(&self) -> bool {
        matches!(self, Self::Precondition(_) | Self::Config(_))
    }

    /// The assertion failure, if this is one
    pub fn as_assertion(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Assertion(failure) => Some(&**failure),
            _ => None,
        }
    }
}

impl From<AssertionFailure> for HarnessError {
    fn from(failure: AssertionFailure) -> Self {
        Self::Assertion(Box::new(failure))
    }
}
