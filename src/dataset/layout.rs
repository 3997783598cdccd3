//! Recovering the permutation a fetch applied
//!
//! Because every cell value is unique, each value in a fetched result names
//! exactly one canonical `(row, column)`. A result set whose positions map
//! consistently onto canonical rows and columns has a [`Layout`]: the
//! canonical row behind each result row, and the canonical column behind
//! each result column.

use crate::engine::ResultSet;

use super::generator::CanonicalDataset;

/// Canonical indices behind each position of a fetched result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// `rows[i]`: canonical row shown at result row `i`
    pub rows: Vec<usize>,
    /// `columns[j]`: canonical column shown at result column `j`
    pub columns: Vec<usize>,
}

impl Layout {
    /// Derive the layout of `result` against `dataset`.
    ///
    /// `None` when some value is not a cell of the dataset, or when rows
    /// disagree on which canonical column sits at a position.
    pub fn derive(dataset: &CanonicalDataset, result: &ResultSet) -> Option<Layout> {
        let mut rows = Vec::with_capacity(result.len());
        let mut columns: Option<Vec<usize>> = None;

        for row in result.rows() {
            let mut canonical_row = None;
            let mut row_columns = Vec::with_capacity(row.len());

            for value in row {
                let (r, c) = dataset.locate(value)?;
                match canonical_row {
                    None => canonical_row = Some(r),
                    Some(existing) if existing != r => return None,
                    Some(_) => {}
                }
                row_columns.push(c);
            }

            match &columns {
                None => columns = Some(row_columns),
                Some(existing) if *existing != row_columns => return None,
                Some(_) => {}
            }

            rows.push(canonical_row?);
        }

        Some(Layout {
            rows,
            columns: columns.unwrap_or_default(),
        })
    }
}
