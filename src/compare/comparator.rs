//! Order-sensitive and order-insensitive result set equality
//!
//! Both inputs are copied into canonical text rows. Relaxing column order
//! sorts the values inside each row; relaxing row order then sorts the rows
//! lexicographically. The normalized sequences must match element by
//! element.

use crate::engine::ResultSet;

use super::mode::CompareMode;

/// Logical equality of two result sets under the given strictness
pub fn result_sets_equal(
    r1: &ResultSet,
    r2: &ResultSet,
    enforce_row_order: bool,
    enforce_column_order: bool,
) -> bool {
    if r1.len() != r2.len() {
        return false;
    }
    normalize(r1, enforce_row_order, enforce_column_order)
        == normalize(r2, enforce_row_order, enforce_column_order)
}

/// [`result_sets_equal`] with a [`CompareMode`]
pub fn compare(r1: &ResultSet, r2: &ResultSet, mode: CompareMode) -> bool {
    result_sets_equal(r1, r2, mode.enforce_row_order, mode.enforce_column_order)
}

/// All four modes, in [`CompareMode::ALL`] order
pub fn compare_all(r1: &ResultSet, r2: &ResultSet) -> [bool; 4] {
    CompareMode::ALL.map(|mode| compare(r1, r2, mode))
}

fn normalize(
    result: &ResultSet,
    enforce_row_order: bool,
    enforce_column_order: bool,
) -> Vec<Vec<String>> {
    let mut rows = result.canonical_rows();
    if !enforce_column_order {
        for row in &mut rows {
            row.sort_unstable();
        }
    }
    if !enforce_row_order {
        rows.sort_unstable();
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Value;

    fn ints(rows: &[&[i64]]) -> ResultSet {
        ResultSet::new(
            rows.iter()
                .map(|r| r.iter().map(|v| Value::Integer(*v)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_identical() {
        let a = ints(&[&[1, 2], &[3, 4]]);
        assert_eq!(compare_all(&a, &a.clone()), [true, true, true, true]);
    }

    #[test]
    fn test_row_swapped() {
        let a = ints(&[&[1, 2], &[3, 4]]);
        let b = ints(&[&[3, 4], &[1, 2]]);
        assert_eq!(compare_all(&a, &b), [false, true, false, true]);
    }

    #[test]
    fn test_column_swapped() {
        let a = ints(&[&[1, 2], &[3, 4]]);
        let b = ints(&[&[2, 1], &[4, 3]]);
        assert_eq!(compare_all(&a, &b), [false, false, true, true]);
    }

    #[test]
    fn test_both_swapped_independently() {
        let a = ints(&[&[2, 1], &[4, 3]]);
        let b = ints(&[&[3, 4], &[1, 2]]);
        assert_eq!(compare_all(&a, &b), [false, false, false, true]);
    }

    #[test]
    fn test_different_content() {
        let a = ints(&[&[1, 2], &[3, 4]]);
        let b = ints(&[&[1, 2], &[3, 5]]);
        assert_eq!(compare_all(&a, &b), [false; 4]);
    }

    #[test]
    fn test_different_lengths() {
        let a = ints(&[&[1, 2], &[3, 4]]);
        let b = ints(&[&[1, 2]]);
        assert_eq!(compare_all(&a, &b), [false; 4]);
    }

    #[test]
    fn test_representation_agnostic() {
        let a = ResultSet::new(vec![vec![
            Value::Integer(1),
            Value::Float(2.0),
            Value::Text("3".into()),
        ]]);
        let b = ResultSet::new(vec![vec![
            Value::Text("1".into()),
            Value::Text("2".into()),
            Value::Integer(3),
        ]]);
        assert!(result_sets_equal(&a, &b, true, true));
    }

    #[test]
    fn test_duplicate_rows_after_column_sort() {
        let a = ints(&[&[1, 2], &[2, 1], &[3, 4]]);
        let b = ints(&[&[3, 4], &[1, 2], &[1, 2]]);
        assert!(result_sets_equal(&a, &b, false, false));
        assert!(!result_sets_equal(&a, &b, false, true));
    }

    #[test]
    fn test_empty_results_are_equal() {
        assert_eq!(
            compare_all(&ResultSet::empty(), &ResultSet::empty()),
            [true; 4]
        );
    }
}
