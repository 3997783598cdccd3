//! The fixed expectation table
//!
//! Ten unordered regime pairs (four self-pairs, six cross-pairs), each with
//! the outcome the comparator must produce in TT, FT, TF, FF order.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::compare::CompareMode;
use crate::dataset::DatasetShape;
use crate::source::PermutationRegime;

use PermutationRegime::{ColumnRandom, FullRandom, Plain, RowRandom};

/// Expected comparator results in [`CompareMode::ALL`] order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpectedOutcomes(pub [bool; 4]);

impl ExpectedOutcomes {
    /// Expected result for one mode
    pub fn for_mode(&self, mode: CompareMode) -> bool {
        self.0[mode.index()]
    }

    pub fn as_array(&self) -> [bool; 4] {
        self.0
    }
}

impl fmt::Display for ExpectedOutcomes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, outcome) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", if *outcome { "T" } else { "F" })?;
        }
        write!(f, "]")
    }
}

impl Serialize for ExpectedOutcomes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// An unordered pair of regimes, stored left then right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RegimePair {
    pub left: PermutationRegime,
    pub right: PermutationRegime,
}

impl RegimePair {
    pub const fn new(left: PermutationRegime, right: PermutationRegime) -> Self {
        Self { left, right }
    }

    pub fn is_self_pair(&self) -> bool {
        self.left == self.right
    }

    /// Rows are expected to sit at different positions
    pub fn rows_differ(&self) -> bool {
        self.left.randomizes_rows() || self.right.randomizes_rows()
    }

    /// Columns are expected to sit at different positions
    pub fn columns_differ(&self) -> bool {
        self.left.randomizes_columns() || self.right.randomizes_columns()
    }

    /// Both regimes reduced to what they do on `shape`
    pub fn effective_for(&self, shape: &DatasetShape) -> Self {
        Self::new(self.left.effective_for(shape), self.right.effective_for(shape))
    }
}

impl fmt::Display for RegimePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.left, self.right)
    }
}

/// The ten pairs in checking order
pub const REGIME_PAIRS: [RegimePair; 10] = [
    RegimePair::new(Plain, Plain),
    RegimePair::new(Plain, RowRandom),
    RegimePair::new(Plain, ColumnRandom),
    RegimePair::new(Plain, FullRandom),
    RegimePair::new(RowRandom, RowRandom),
    RegimePair::new(RowRandom, ColumnRandom),
    RegimePair::new(RowRandom, FullRandom),
    RegimePair::new(ColumnRandom, ColumnRandom),
    RegimePair::new(ColumnRandom, FullRandom),
    RegimePair::new(FullRandom, FullRandom),
];

const T: bool = true;
const F: bool = false;

/// Table lookup. Order-insensitive: `(a, b)` and `(b, a)` share a row.
pub fn expected_outcomes(pair: RegimePair) -> ExpectedOutcomes {
    let outcomes = match (pair.left, pair.right) {
        (Plain, Plain) => [T, T, T, T],
        (Plain, RowRandom) | (RowRandom, Plain) => [F, T, F, T],
        (Plain, ColumnRandom) | (ColumnRandom, Plain) => [F, F, T, T],
        (Plain, FullRandom) | (FullRandom, Plain) => [F, F, F, T],
        (RowRandom, RowRandom) => [F, T, F, T],
        (RowRandom, ColumnRandom) | (ColumnRandom, RowRandom) => [F, F, F, T],
        (RowRandom, FullRandom) | (FullRandom, RowRandom) => [F, F, F, T],
        (ColumnRandom, ColumnRandom) => [F, F, T, T],
        (ColumnRandom, FullRandom) | (FullRandom, ColumnRandom) => [F, F, F, T],
        (FullRandom, FullRandom) => [F, F, F, T],
    };
    ExpectedOutcomes(outcomes)
}

/// Expected outcomes for `pair` on a dataset of `shape`.
///
/// Looked up on the effective regimes, so a single-row or single-column
/// dataset expects equality where the permutation is necessarily the
/// identity.
pub fn expected_for_shape(pair: RegimePair, shape: &DatasetShape) -> ExpectedOutcomes {
    expected_outcomes(pair.effective_for(shape))
}

/// The table as `(pair, outcomes)` rows, in checking order
pub fn expectation_matrix() -> [(RegimePair, ExpectedOutcomes); 10] {
    REGIME_PAIRS.map(|pair| (pair, expected_outcomes(pair)))
}
