//! Assertion matrix
//!
//! Checks a pair of result sets against the fixed expectation table in
//! every strictness mode and in both argument orders.
//!
//! # Invariants
//!
//! - The table is fixed; degenerate shapes change which row is looked up,
//!   never the rows themselves
//! - The first mismatch is fatal

mod assertion;
mod errors;
mod expectation;

pub use assertion::check_comparisons;
pub use errors::{AssertionFailure, AssertionResult, Direction};
pub use expectation::{
    expectation_matrix, expected_for_shape, expected_outcomes, ExpectedOutcomes, RegimePair,
    REGIME_PAIRS,
};
