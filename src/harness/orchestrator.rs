//! The run pipeline
//!
//! Generate → materialize → (fetch ×2 → compare ×4 ×2 → check) ×10.
//!
//! The session is held by a [`SessionGuard`] for the whole run, so it is
//! released on success, on an assertion failure and on a storage error
//! alike.

use std::fmt;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::dataset::{CanonicalDataset, DatasetGenerator, Layout};
use crate::engine::{Session, SessionGuard};
use crate::matrix::{check_comparisons, expected_outcomes, Direction, RegimePair, REGIME_PAIRS};
use crate::observability::{log_event_with_fields, Event, HarnessMetrics, ObservationScope};
use crate::source::{Fetch, PermutationRegime, ResultSource};

use super::config::HarnessConfig;
use super::errors::{HarnessError, HarnessResult};
use super::report::{PairOutcome, RunReport};

/// Comparator evaluations per direction
const MODES_PER_DIRECTION: u64 = 4;

/// Mixed into the run seed for column shuffles, so they do not replay the
/// memory engine's row shuffles
const COLUMN_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Rows,
    Columns,
}

impl Axis {
    fn randomized_by(&self, regime: PermutationRegime) -> bool {
        match self {
            Axis::Rows => regime.randomizes_rows(),
            Axis::Columns => regime.randomizes_columns(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => write!(f, "rows"),
            Axis::Columns => write!(f, "columns"),
        }
    }
}

/// Runs the full pair matrix for one configuration
pub struct Orchestrator {
    config: HarnessConfig,
    metrics: HarnessMetrics,
}

impl Orchestrator {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            metrics: HarnessMetrics::new(),
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn metrics(&self) -> &HarnessMetrics {
        &self.metrics
    }

    /// Validate, open the configured DSN and run every pair.
    ///
    /// Configuration and shape are checked before the session is opened.
    pub fn run(&self) -> HarnessResult<RunReport> {
        self.config.validate()?;
        self.config.shape()?;

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let session = self.config.dsn.open(seed)?;
        self.run_session(session, seed)
    }

    /// Run every pair on an already opened session.
    ///
    /// The guard is consumed: it is closed explicitly on success and
    /// dropped (which closes it) on any error.
    pub fn run_session(&self, session: SessionGuard, seed: u64) -> HarnessResult<RunReport> {
        let seed_text = seed.to_string();
        log_event_with_fields(
            Event::RunStart,
            &[
                ("rows", &self.config.rows.to_string()),
                ("columns", &self.config.columns.to_string()),
                ("dsn", &self.config.dsn.to_string()),
                ("relation", &self.config.relation),
                ("seed", &seed_text),
            ],
        );

        match self.execute(session, seed) {
            Ok(report) => {
                log_event_with_fields(
                    Event::RunComplete,
                    &[
                        ("run_id", &report.run_id.to_string()),
                        ("pairs", &report.pairs.len().to_string()),
                        ("resamples", &report.total_resamples().to_string()),
                    ],
                );
                Ok(report)
            }
            Err(e) => {
                log_event_with_fields(
                    Event::RunFailed,
                    &[
                        ("code", e.code()),
                        ("reason", &e.to_string()),
                        ("seed", &seed_text),
                    ],
                );
                Err(e)
            }
        }
    }

    fn execute(&self, mut session: SessionGuard, seed: u64) -> HarnessResult<RunReport> {
        let started_at = Utc::now();

        self.config.validate()?;
        let shape = self.config.shape()?;

        let backend = session.backend().to_string();
        let dataset = DatasetGenerator::new(shape).generate();
        let handle = dataset.materialize(&mut *session, &self.config.relation)?;
        self.metrics.add_rows_inserted(dataset.rows().len() as u64);
        log_event_with_fields(
            Event::DatasetMaterialized,
            &[
                ("relation", handle.name()),
                ("rows", &shape.rows().to_string()),
                ("columns", &shape.columns().to_string()),
            ],
        );

        let mut pairs = Vec::with_capacity(REGIME_PAIRS.len());
        {
            let rng = StdRng::seed_from_u64(seed ^ COLUMN_STREAM);
            let mut source = ResultSource::new(&mut *session, &handle, rng);
            for pair in REGIME_PAIRS {
                pairs.push(self.check_pair(&mut source, &dataset, pair)?);
            }
        }

        session.close()?;

        Ok(RunReport {
            run_id: Uuid::new_v4(),
            started_at,
            backend,
            dsn: self.config.dsn.to_string(),
            seed,
            reproducible: self.config.dsn.is_reproducible(),
            rows: shape.rows(),
            columns: shape.columns(),
            relation: self.config.relation.clone(),
            pairs,
            metrics: self.metrics.snapshot(),
        })
    }

    fn check_pair<S: Session + ?Sized, R: Rng>(
        &self,
        source: &mut ResultSource<'_, S, R>,
        dataset: &CanonicalDataset,
        pair: RegimePair,
    ) -> HarnessResult<PairOutcome> {
        let effective = pair.effective_for(dataset.shape());
        let expected = expected_outcomes(effective);

        let label = pair.to_string();
        let expected_text = expected.to_string();
        let scope = ObservationScope::with_fields(
            "PAIR",
            &[("pair", &label), ("expected", &expected_text)],
        );

        let mut left = self.fetch(source, pair.left)?;
        let mut right = self.fetch(source, pair.right)?;

        let mut resamples = 0;
        while resamples < self.config.max_resamples {
            let axis = match collision(dataset, effective, &left, &right) {
                Some(axis) => axis,
                None => break,
            };
            resamples += 1;
            self.metrics.increment_resamples();
            log_event_with_fields(
                Event::PairResampled,
                &[
                    ("pair", &label),
                    ("axis", &axis.to_string()),
                    ("attempt", &resamples.to_string()),
                ],
            );

            if axis.randomized_by(effective.right) {
                right = self.fetch(source, pair.right)?;
            } else {
                left = self.fetch(source, pair.left)?;
            }
        }

        match check_comparisons(&left.result, &right.result, &expected) {
            Ok(_) => {
                self.metrics.add_comparisons(2 * MODES_PER_DIRECTION);
                self.metrics.increment_pairs_checked();
                scope.complete_with_fields(&[("resamples", &resamples.to_string())]);
                Ok(PairOutcome {
                    pair,
                    effective,
                    expected,
                    resamples,
                })
            }
            Err(failure) => {
                let evaluated = match failure.direction {
                    Direction::Forward => MODES_PER_DIRECTION,
                    Direction::Reverse => 2 * MODES_PER_DIRECTION,
                };
                self.metrics.add_comparisons(evaluated);

                let failure = failure.for_pair(pair);
                log_event_with_fields(
                    Event::AssertionFailed,
                    &[
                        ("pair", &label),
                        ("direction", failure.direction.as_str()),
                        ("mode", failure.mode.label()),
                        ("expected", &expected_text),
                        ("left_fingerprint", &failure.left_fingerprint),
                        ("right_fingerprint", &failure.right_fingerprint),
                    ],
                );
                scope.fail(failure.code());
                Err(HarnessError::from(failure))
            }
        }
    }

    fn fetch<S: Session + ?Sized, R: Rng>(
        &self,
        source: &mut ResultSource<'_, S, R>,
        regime: PermutationRegime,
    ) -> HarnessResult<Fetch> {
        let fetch = source.fetch(regime)?;
        self.metrics.increment_fetches();
        self.metrics.increment_queries();
        log_event_with_fields(
            Event::FetchIssued,
            &[("regime", regime.as_str()), ("sql", &fetch.sql)],
        );
        Ok(fetch)
    }
}

/// First axis that must differ between the two fetches but does not.
///
/// Fetches without a layout never collide; the assertion reports them.
fn collision(
    dataset: &CanonicalDataset,
    effective: RegimePair,
    left: &Fetch,
    right: &Fetch,
) -> Option<Axis> {
    let left_layout = Layout::derive(dataset, &left.result)?;
    let right_layout = Layout::derive(dataset, &right.result)?;

    if effective.rows_differ() && left_layout.rows == right_layout.rows {
        return Some(Axis::Rows);
    }
    if effective.columns_differ() && left_layout.columns == right_layout.columns {
        return Some(Axis::Columns);
    }
    None
}
