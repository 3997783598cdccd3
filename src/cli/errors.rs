//! CLI-specific error types
//!
//! All CLI errors are FATAL. Each carries the process exit code it ends
//! the run with.

use std::fmt;
use std::io;

use crate::harness::{HarnessError, EXIT_ASSERTION, EXIT_PRECONDITION, EXIT_STORAGE};

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Invalid command-line value or configuration
    ConfigError,
    /// Row or column count rejected
    Precondition,
    /// Assertion matrix mismatch
    AssertionFailed,
    /// Storage session failure
    StorageError,
    /// I/O error on stdout
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PERM_CONFIG",
            Self::Precondition => "PERM_PRECONDITION",
            Self::AssertionFailed => "PERM_ASSERTION_FAILED",
            Self::StorageError => "PERM_STORAGE_IO",
            Self::IoError => "PERM_CLI_IO_ERROR",
        }
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigError | Self::Precondition => EXIT_PRECONDITION,
            Self::AssertionFailed => EXIT_ASSERTION,
            Self::StorageError | Self::IoError => EXIT_STORAGE,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessError> for CliError {
    fn from(e: HarnessError) -> Self {
        let code = match &e {
            HarnessError::Precondition(_) => CliErrorCode::Precondition,
            HarnessError::Config(_) => CliErrorCode::ConfigError,
            HarnessError::Assertion(_) => CliErrorCode::AssertionFailed,
            HarnessError::Storage(_) => CliErrorCode::StorageError,
        };
        Self::new(code, e.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
