//! Assertion failures
//!
//! An assertion failure is FATAL. The run stops at the first one and no
//! further pairs are checked.

use std::fmt;

use serde::Serialize;

use crate::compare::CompareMode;

use super::expectation::{ExpectedOutcomes, RegimePair};

/// Which argument order the failing comparison used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// `(r1, r2)`
    Forward,
    /// `(r2, r1)`
    Reverse,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A comparator result that did not match the expected vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionFailure {
    /// Regime pair under check, when known
    pub pair: Option<RegimePair>,
    pub direction: Direction,
    /// First mode that disagreed
    pub mode: CompareMode,
    pub expected: ExpectedOutcomes,
    /// All four outcomes observed in `direction`
    pub actual: [bool; 4],
    /// Fingerprint of the left result set of the pair
    pub left_fingerprint: String,
    /// Fingerprint of the right result set of the pair
    pub right_fingerprint: String,
}

impl AssertionFailure {
    pub const CODE: &'static str = "PERM_ASSERTION_FAILED";

    /// Attach the regime pair being checked
    pub fn for_pair(mut self, pair: RegimePair) -> Self {
        self.pair = Some(pair);
        self
    }

    pub fn code(&self) -> &'static str {
        Self::CODE
    }

    /// Expected result for the failing mode
    pub fn expected_for_mode(&self) -> bool {
        self.expected.for_mode(self.mode)
    }

    /// Observed result for the failing mode
    pub fn actual_for_mode(&self) -> bool {
        self.actual[self.mode.index()]
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FATAL] {}: ", Self::CODE)?;
        if let Some(pair) = &self.pair {
            write!(f, "pair {} ", pair)?;
        }
        write!(
            f,
            "{} mode {} expected {} got {} (expected {}, left {}, right {})",
            self.direction,
            self.mode,
            self.expected_for_mode(),
            self.actual_for_mode(),
            self.expected,
            self.left_fingerprint,
            self.right_fingerprint,
        )
    }
}

impl std::error::Error for AssertionFailure {}

/// Result type for matrix checks
pub type AssertionResult<T> = Result<T, AssertionFailure>;
