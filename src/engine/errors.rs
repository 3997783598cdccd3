//! # Storage Engine Errors
//!
//! Storage failures are never retried; every variant is fatal to the run.

use thiserror::Error;

/// Result type for storage engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Storage engine errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid DSN '{0}': expected memory, sqlite::memory: or sqlite:<path>")]
    InvalidDsn(String),

    #[error("Failed to open session: {0}")]
    Open(String),

    #[error("Session already closed")]
    SessionClosed,

    #[error("Relation already exists: {0}")]
    RelationExists(String),

    #[error("Relation not found: {0}")]
    RelationNotFound(String),

    #[error("Unknown column '{column}' in relation '{relation}'")]
    UnknownColumn { relation: String, column: String },

    #[error("Column list mismatch for '{relation}': expected [{expected}], got [{actual}]")]
    ColumnMismatch {
        relation: String,
        expected: String,
        actual: String,
    },

    #[error("Row {row} has {actual} values, expected {expected}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Type mismatch in column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Syntax error in '{sql}': {reason}")]
    Syntax { sql: String, reason: String },

    #[error("Unsupported value in column {column}: {kind}")]
    UnsupportedValue { column: usize, kind: &'static str },

    #[error("Backend error: {0}")]
    Backend(String),
}

impl EngineError {
    /// Build a syntax error for the given statement text
    pub fn syntax(sql: &str, reason: impl Into<String>) -> Self {
        EngineError::Syntax {
            sql: sql.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidDsn(_) => "PERM_ENGINE_INVALID_DSN",
            EngineError::Open(_) => "PERM_ENGINE_OPEN_FAILED",
            EngineError::SessionClosed => "PERM_ENGINE_SESSION_CLOSED",
            EngineError::RelationExists(_) | EngineError::RelationNotFound(_) => {
                "PERM_ENGINE_RELATION"
            }
            EngineError::UnknownColumn { .. }
            | EngineError::ColumnMismatch { .. }
            | EngineError::ArityMismatch { .. }
            | EngineError::TypeMismatch { .. } => "PERM_ENGINE_SCHEMA",
            EngineError::Syntax { .. } => "PERM_ENGINE_SYNTAX",
            EngineError::UnsupportedValue { .. } => "PERM_ENGINE_VALUE",
            EngineError::Backend(_) => "PERM_ENGINE_BACKEND",
        }
    }
}

impl From<rusqlite::Error> for EngineError {
    fn from(e: rusqlite::Error) -> Self {
        EngineError::Backend(e.to_string())
    }
}
