//! Run report written on success

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::matrix::{ExpectedOutcomes, RegimePair};
use crate::observability::MetricsSnapshot;

/// Outcome of one checked pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairOutcome {
    #[serde(flatten)]
    pub pair: RegimePair,
    /// Regimes the expectation was looked up on
    pub effective: RegimePair,
    pub expected: ExpectedOutcomes,
    /// Collisions redrawn before the check
    pub resamples: u32,
}

/// Summary of a passing run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub backend: String,
    pub dsn: String,
    pub seed: u64,
    /// Whether `seed` alone replays row order on this backend
    pub reproducible: bool,
    pub rows: usize,
    pub columns: usize,
    pub relation: String,
    pub pairs: Vec<PairOutcome>,
    pub metrics: MetricsSnapshot,
}

impl RunReport {
    /// Total redraws across all pairs
    pub fn total_resamples(&self) -> u32 {
        self.pairs.iter().map(|p| p.resamples).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PermutationRegime;

    #[test]
    fn test_pair_outcome_json_shape() {
        let pair = RegimePair::new(PermutationRegime::Plain, PermutationRegime::RowRandom);
        let outcome = PairOutcome {
            pair,
            effective: pair,
            expected: ExpectedOutcomes([false, true, false, true]),
            resamples: 1,
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["left"], "plain");
        assert_eq!(json["right"], "row_random");
        assert_eq!(json["effective"]["right"], "row_random");
        assert_eq!(json["expected"], serde_json::json!([false, true, false, true]));
        assert_eq!(json["resamples"], 1);
    }
}
