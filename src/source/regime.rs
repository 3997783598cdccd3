//! Permutation regimes
//!
//! A regime is a property of a fetch call, never of the stored data.

use std::fmt;

use serde::Serialize;

use crate::dataset::DatasetShape;

/// Ordering contract of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermutationRegime {
    /// Schema column order, natural row order (the reference order)
    Plain,
    /// Schema column order, engine-randomized rows
    RowRandom,
    /// Random projection order, natural row order
    ColumnRandom,
    /// Both randomized independently
    FullRandom,
}

impl PermutationRegime {
    pub const ALL: [PermutationRegime; 4] = [
        PermutationRegime::Plain,
        PermutationRegime::RowRandom,
        PermutationRegime::ColumnRandom,
        PermutationRegime::FullRandom,
    ];

    /// Regime with the given randomized axes
    pub fn from_axes(random_rows: bool, random_columns: bool) -> Self {
        match (random_rows, random_columns) {
            (false, false) => PermutationRegime::Plain,
            (true, false) => PermutationRegime::RowRandom,
            (false, true) => PermutationRegime::ColumnRandom,
            (true, true) => PermutationRegime::FullRandom,
        }
    }

    pub fn randomizes_rows(&self) -> bool {
        matches!(self, PermutationRegime::RowRandom | PermutationRegime::FullRandom)
    }

    pub fn randomizes_columns(&self) -> bool {
        matches!(
            self,
            PermutationRegime::ColumnRandom | PermutationRegime::FullRandom
        )
    }

    /// The regime this one actually behaves as for `shape`.
    ///
    /// A permutation of a single row (or column) is the identity, so the
    /// randomization on a length-1 axis is dropped.
    pub fn effective_for(&self, shape: &DatasetShape) -> Self {
        Self::from_axes(
            self.randomizes_rows() && shape.rows() > 1,
            self.randomizes_columns() && shape.columns() > 1,
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PermutationRegime::Plain => "plain",
            PermutationRegime::RowRandom => "row_random",
            PermutationRegime::ColumnRandom => "column_random",
            PermutationRegime::FullRandom => "full_random",
        }
    }
}

impl fmt::Display for PermutationRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
