//! Precondition errors for dataset shapes
//!
//! All precondition errors are FATAL and are raised before any I/O.

use std::fmt;

/// Precondition error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionCode {
    /// Row count ≤ 0
    NonPositiveRows,
    /// Column count ≤ 0
    NonPositiveColumns,
    /// R·C overflows or exceeds the exact float range
    ShapeTooLarge,
}

impl PreconditionCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PreconditionCode::NonPositiveRows => "PERM_PRECONDITION_ROWS",
            PreconditionCode::NonPositiveColumns => "PERM_PRECONDITION_COLUMNS",
            PreconditionCode::ShapeTooLarge => "PERM_PRECONDITION_SHAPE",
        }
    }
}

impl fmt::Display for PreconditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An invalid dataset shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreconditionError {
    code: PreconditionCode,
    message: String,
}

impl PreconditionError {
    pub fn non_positive_rows(rows: i64) -> Self {
        Self {
            code: PreconditionCode::NonPositiveRows,
            message: format!("rows must be positive, got {}", rows),
        }
    }

    pub fn non_positive_columns(columns: i64) -> Self {
        Self {
            code: PreconditionCode::NonPositiveColumns,
            message: format!("columns must be positive, got {}", columns),
        }
    }

    pub fn shape_too_large(rows: i64, columns: i64, max_cells: u64) -> Self {
        Self {
            code: PreconditionCode::ShapeTooLarge,
            message: format!(
                "{} x {} cells exceeds the maximum of {}",
                rows, columns, max_cells
            ),
        }
    }

    /// Get the error code
    pub fn code(&self) -> PreconditionCode {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FATAL] {}: {}", self.code, self.message)
    }
}

impl std::error::Error for PreconditionError {}

/// Result type for shape validation
pub type PreconditionResult<T> = Result<T, PreconditionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            PreconditionError::non_positive_rows(0).code().code(),
            "PERM_PRECONDITION_ROWS"
        );
        assert_eq!(
            PreconditionError::non_positive_columns(-1).code(),
            PreconditionCode::NonPositiveColumns
        );
    }

    #[test]
    fn test_display() {
        let err = PreconditionError::non_positive_rows(-3);
        let display = err.to_string();
        assert!(display.contains("FATAL"));
        assert!(display.contains("PERM_PRECONDITION_ROWS"));
        assert!(display.contains("-3"));
    }
}
