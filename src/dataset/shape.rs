//! Validated dataset dimensions

use serde::Serialize;

use super::errors::{PreconditionError, PreconditionResult};

/// Largest R·C for which every cell value is exact in an f64 column
pub const MAX_CELLS: u64 = 1 << 53;

/// R rows × C columns, both positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetShape {
    rows: usize,
    columns: usize,
}

impl DatasetShape {
    /// Validate raw counts.
    ///
    /// Rows are checked before columns, so `(0, 0)` reports the row count.
    pub fn new(rows: i64, columns: i64) -> PreconditionResult<Self> {
        if rows <= 0 {
            return Err(PreconditionError::non_positive_rows(rows));
        }
        if columns <= 0 {
            return Err(PreconditionError::non_positive_columns(columns));
        }

        let too_large = || PreconditionError::shape_too_large(rows, columns, MAX_CELLS);

        let cells = (rows as u64)
            .checked_mul(columns as u64)
            .filter(|&cells| cells <= MAX_CELLS)
            .ok_or_else(too_large)?;

        match (usize::try_from(rows), usize::try_from(columns), usize::try_from(cells)) {
            (Ok(rows), Ok(columns), Ok(_)) => Ok(Self { rows, columns }),
            _ => Err(too_large()),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells
    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }
}
