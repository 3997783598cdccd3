//! Comparator Law Tests
//!
//! Property tests for result set equality:
//! - Symmetry in the two arguments, in every mode
//! - Monotone relaxation: strict equality implies every relaxed equality,
//!   and fully relaxed inequality implies every strict inequality
//! - Reflexivity under full relaxation for any permutation of a canonical
//!   dataset

use permcheck::compare::{compare_all, result_sets_equal, CompareMode};
use permcheck::dataset::{DatasetGenerator, DatasetShape};
use permcheck::engine::{ResultSet, Value};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Small result sets with a fixed width and deliberately colliding values
fn result_set_pair() -> impl Strategy<Value = (ResultSet, ResultSet)> {
    (1usize..4, 0usize..5).prop_flat_map(|(width, len)| {
        let row = prop::collection::vec(0i64..4, width);
        let rows = prop::collection::vec(row, len);
        (rows.clone(), rows).prop_map(|(a, b)| (to_result(a), to_result(b)))
    })
}

fn to_result(rows: Vec<Vec<i64>>) -> ResultSet {
    ResultSet::new(
        rows.into_iter()
            .map(|r| r.into_iter().map(Value::Integer).collect())
            .collect(),
    )
}

/// A shape plus one row permutation and one column permutation per side
fn permuted_shape() -> impl Strategy<Value = (i64, i64, [Vec<usize>; 4])> {
    (1usize..6, 1usize..6).prop_flat_map(|(rows, columns)| {
        let row_perm = Just((0..rows).collect::<Vec<_>>()).prop_shuffle();
        let col_perm = Just((0..columns).collect::<Vec<_>>()).prop_shuffle();
        (
            Just(rows as i64),
            Just(columns as i64),
            (row_perm.clone(), col_perm.clone(), row_perm, col_perm)
                .prop_map(|(a, b, c, d)| [a, b, c, d]),
        )
    })
}

fn permute(base: &ResultSet, row_order: &[usize], column_order: &[usize]) -> ResultSet {
    ResultSet::new(
        row_order
            .iter()
            .map(|&r| column_order.iter().map(|&c| base.rows()[r][c].clone()).collect())
            .collect(),
    )
}

// =============================================================================
// Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_symmetric((a, b) in result_set_pair()) {
        for mode in CompareMode::ALL {
            prop_assert_eq!(
                result_sets_equal(&a, &b, mode.enforce_row_order, mode.enforce_column_order),
                result_sets_equal(&b, &a, mode.enforce_row_order, mode.enforce_column_order)
            );
        }
    }

    #[test]
    fn prop_relaxation_is_monotone((a, b) in result_set_pair()) {
        let [tt, ft, tf, ff] = compare_all(&a, &b);
        if tt {
            prop_assert!(ft && tf && ff);
        }
        if !ff {
            prop_assert!(!tt && !ft && !tf);
        }
        if ft || tf {
            prop_assert!(ff);
        }
    }

    #[test]
    fn prop_any_two_permutations_equal_when_fully_relaxed(
        (rows, columns, perms) in permuted_shape()
    ) {
        let dataset = DatasetGenerator::new(DatasetShape::new(rows, columns).unwrap()).generate();
        let base = ResultSet::new(dataset.rows().to_vec());

        let left = permute(&base, &perms[0], &perms[1]);
        let right = permute(&base, &perms[2], &perms[3]);

        prop_assert!(result_sets_equal(&left, &right, false, false));
    }

    #[test]
    fn prop_permutation_outcomes_follow_layout(
        (rows, columns, perms) in permuted_shape()
    ) {
        let dataset = DatasetGenerator::new(DatasetShape::new(rows, columns).unwrap()).generate();
        let base = ResultSet::new(dataset.rows().to_vec());

        let left = permute(&base, &perms[0], &perms[1]);
        let right = permute(&base, &perms[2], &perms[3]);

        // unique cells: each axis compares equal exactly when its order matches
        let same_rows = perms[0] == perms[2];
        let same_columns = perms[1] == perms[3];
        prop_assert_eq!(
            compare_all(&left, &right),
            [same_rows && same_columns, same_columns, same_rows, true]
        );
    }
}

// =============================================================================
// Concrete Scenarios
// =============================================================================

fn two_by_two(rows: [[i64; 2]; 2]) -> ResultSet {
    to_result(rows.iter().map(|r| r.to_vec()).collect())
}

/// Row-reordered copy: equal only once row order is relaxed.
#[test]
fn test_row_reordered_copy() {
    let base = two_by_two([[1, 2], [3, 4]]);
    let reordered = two_by_two([[3, 4], [1, 2]]);
    assert_eq!(compare_all(&base, &reordered), [false, true, false, true]);
}

/// Column-permuted copy: equal only once column order is relaxed.
#[test]
fn test_column_permuted_copy() {
    let base = two_by_two([[1, 2], [3, 4]]);
    let permuted = two_by_two([[2, 1], [4, 3]]);
    assert_eq!(compare_all(&base, &permuted), [false, false, true, true]);
}

/// Two independent row and column permutations: equal only fully relaxed.
#[test]
fn test_independently_permuted_copies() {
    let a = two_by_two([[2, 1], [4, 3]]);
    let b = two_by_two([[3, 4], [1, 2]]);
    assert_eq!(compare_all(&a, &b), [false, false, false, true]);
}
