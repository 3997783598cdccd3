//! Checking a pair of result sets against an expected vector

use crate::compare::{compare, CompareMode};
use crate::engine::ResultSet;

use super::errors::{AssertionFailure, AssertionResult, Direction};
use super::expectation::ExpectedOutcomes;

/// Run all four modes on `(r1, r2)` and then on `(r2, r1)`.
///
/// Both directions must produce `expected`. The first disagreeing mode is
/// reported; the reverse direction is not evaluated when the forward one
/// already failed.
pub fn check_comparisons(
    r1: &ResultSet,
    r2: &ResultSet,
    expected: &ExpectedOutcomes,
) -> AssertionResult<[bool; 4]> {
    let forward = check_direction(r1, r2, expected, Direction::Forward)?;
    check_direction(r2, r1, expected, Direction::Reverse)?;
    Ok(forward)
}

fn check_direction(
    a: &ResultSet,
    b: &ResultSet,
    expected: &ExpectedOutcomes,
    direction: Direction,
) -> AssertionResult<[bool; 4]> {
    let actual = CompareMode::ALL.map(|mode| compare(a, b, mode));

    let mismatch = CompareMode::ALL
        .iter()
        .find(|mode| actual[mode.index()] != expected.for_mode(**mode));

    match mismatch {
        None => Ok(actual),
        Some(mode) => {
            // fingerprints always name the pair's own left and right sides
            let (left, right) = match direction {
                Direction::Forward => (a, b),
                Direction::Reverse => (b, a),
            };
            Err(AssertionFailure {
                pair: None,
                direction,
                mode: *mode,
                expected: *expected,
                actual,
                left_fingerprint: left.fingerprint(),
                right_fingerprint: right.fingerprint(),
            })
        }
    }
}
