//! Harness Run Tests
//!
//! End-to-end runs of the pair matrix:
//! - Every shape passes on the memory engine, degenerate ones included
//! - SQLite in memory and on a file, with the relation gone afterwards
//! - Preconditions are reported before any session is opened
//! - An engine that ignores ORDER BY RANDOM() fails the matrix
//! - The session is released on every exit path

use std::cell::Cell;
use std::rc::Rc;

use permcheck::dataset::DatasetShape;
use permcheck::engine::{
    ColumnDef, Dsn, EngineError, EngineResult, MemorySession, RelationHandle, ResultSet, Session,
    SessionGuard, Value,
};
use permcheck::harness::{HarnessConfig, HarnessError, Orchestrator};
use permcheck::matrix::RegimePair;
use permcheck::source::PermutationRegime;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn config(rows: i64, columns: i64) -> HarnessConfig {
    HarnessConfig {
        rows,
        columns,
        seed: Some(20240601),
        ..HarnessConfig::default()
    }
}

/// How a wrapped memory session misbehaves
#[derive(Clone, Copy)]
enum Fault {
    /// Drops `ORDER BY RANDOM()` from every query
    IgnoreRandomOrder,
    /// Fails every query after the first `n`
    FailAfter(u32),
}

/// A memory session with a fault, counting closes
struct FaultySession {
    inner: MemorySession,
    fault: Fault,
    queries: u32,
    closes: Rc<Cell<u32>>,
}

impl FaultySession {
    fn guard(fault: Fault, closes: &Rc<Cell<u32>>) -> SessionGuard {
        SessionGuard::new(Box::new(FaultySession {
            inner: MemorySession::open(1),
            fault,
            queries: 0,
            closes: Rc::clone(closes),
        }))
    }
}

impl Session for FaultySession {
    fn backend(&self) -> &'static str {
        "faulty"
    }

    fn create_session_relation(
        &mut self,
        name: &str,
        columns: &[ColumnDef],
    ) -> EngineResult<RelationHandle> {
        self.inner.create_session_relation(name, columns)
    }

    fn insert_rows(
        &mut self,
        relation: &RelationHandle,
        column_names: &[String],
        rows: &[Vec<Value>],
    ) -> EngineResult<usize> {
        self.inner.insert_rows(relation, column_names, rows)
    }

    fn query(&mut self, sql: &str) -> EngineResult<ResultSet> {
        self.queries += 1;
        match self.fault {
            Fault::IgnoreRandomOrder => self.inner.query(&sql.replace(" ORDER BY RANDOM()", "")),
            Fault::FailAfter(n) if self.queries > n => {
                Err(EngineError::Backend("connection lost".into()))
            }
            Fault::FailAfter(_) => self.inner.query(sql),
        }
    }

    fn close(&mut self) -> EngineResult<()> {
        self.closes.set(self.closes.get() + 1);
        self.inner.close()
    }
}

// =============================================================================
// Passing Runs
// =============================================================================

/// Regular and degenerate shapes all pass on the memory engine.
#[test]
fn test_memory_shapes_pass() {
    for (rows, columns) in [(5, 5), (2, 2), (1, 1), (1, 5), (5, 1), (3, 7)] {
        let report = Orchestrator::new(config(rows, columns))
            .run()
            .unwrap_or_else(|e| panic!("{}x{}: {}", rows, columns, e));

        assert_eq!(report.pairs.len(), 10);
        assert_eq!(report.rows, rows as usize);
        assert_eq!(report.columns, columns as usize);
        assert_eq!(report.metrics.pairs_checked, 10);
        assert_eq!(report.metrics.rows_inserted, rows as u64);
    }
}

/// Degenerate shapes record the effective regimes they were checked under.
#[test]
fn test_single_row_reports_effective_regimes() {
    let report = Orchestrator::new(config(1, 4)).run().unwrap();
    let full = report
        .pairs
        .iter()
        .find(|p| p.pair == RegimePair::new(PermutationRegime::Plain, PermutationRegime::FullRandom))
        .unwrap();
    assert_eq!(
        full.effective,
        RegimePair::new(PermutationRegime::Plain, PermutationRegime::ColumnRandom)
    );
    assert_eq!(full.expected.as_array(), [false, false, true, true]);
}

/// The same seed replays the same run on the memory engine.
#[test]
fn test_seeded_memory_runs_replay() {
    let a = Orchestrator::new(config(3, 3)).run().unwrap();
    let b = Orchestrator::new(config(3, 3)).run().unwrap();
    assert_eq!(a.pairs, b.pairs);
    assert_eq!(a.metrics, b.metrics);
}

/// An unseeded run draws a seed and reports it.
#[test]
fn test_unseeded_run_reports_seed() {
    let report = Orchestrator::new(HarnessConfig {
        seed: None,
        ..config(3, 3)
    })
    .run()
    .unwrap();

    let replay = Orchestrator::new(HarnessConfig {
        seed: Some(report.seed),
        ..config(3, 3)
    })
    .run()
    .unwrap();
    assert_eq!(report.pairs, replay.pairs);
}

/// The full matrix passes against SQLite in memory.
#[test]
fn test_sqlite_memory_passes() {
    let report = Orchestrator::new(HarnessConfig {
        dsn: Dsn::SqliteMemory,
        ..config(5, 5)
    })
    .run()
    .unwrap();

    assert_eq!(report.backend, "sqlite");
    assert_eq!(report.pairs.len(), 10);
}

/// A file-backed run leaves no relation behind in the file.
#[test]
fn test_sqlite_file_leaves_no_relation() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("perm.db");

    Orchestrator::new(HarnessConfig {
        dsn: Dsn::SqliteFile(path.clone()),
        relation: "perm_x".into(),
        ..config(4, 3)
    })
    .run()
    .unwrap();

    let conn = rusqlite::Connection::open(&path).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'perm_x'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 0);
}

// =============================================================================
// Preconditions
// =============================================================================

/// Invalid shapes fail before any session is opened.
#[test]
fn test_precondition_before_io() {
    for (rows, columns) in [(0, 5), (5, 0), (-1, 3), (i64::MAX, 2)] {
        let orchestrator = Orchestrator::new(HarnessConfig {
            // opening this DSN would fail with a storage error
            dsn: Dsn::SqliteFile("/nonexistent/permcheck/never.db".into()),
            ..config(rows, columns)
        });

        let err = orchestrator.run().unwrap_err();
        assert!(
            matches!(err, HarnessError::Precondition(_)),
            "{}x{}: {}",
            rows,
            columns,
            err
        );
        assert_eq!(err.exit_code(), 2);
        assert_eq!(orchestrator.metrics().snapshot().fetches, 0);
    }
}

/// The exact-float bound rejects shapes past 2^53 cells.
#[test]
fn test_shape_bound() {
    assert!(DatasetShape::new(1 << 26, 1 << 27).is_ok());
    assert!(DatasetShape::new(1 << 27, 1 << 27).is_err());
}

// =============================================================================
// Failing Runs
// =============================================================================

/// An engine that ignores ORDER BY RANDOM() fails on the first row-random pair.
#[test]
fn test_ignored_random_order_fails_and_closes() {
    let closes = Rc::new(Cell::new(0));
    let orchestrator = Orchestrator::new(HarnessConfig {
        max_resamples: 3,
        ..config(4, 4)
    });

    let err = orchestrator
        .run_session(FaultySession::guard(Fault::IgnoreRandomOrder, &closes), 1)
        .unwrap_err();

    let failure = err.as_assertion().unwrap();
    assert_eq!(
        failure.pair,
        Some(RegimePair::new(PermutationRegime::Plain, PermutationRegime::RowRandom))
    );
    assert_eq!(failure.actual, [true; 4]);
    assert_eq!(err.code(), "PERM_ASSERTION_FAILED");
    assert_eq!(err.exit_code(), 3);

    let metrics = orchestrator.metrics().snapshot();
    assert_eq!(metrics.pairs_checked, 1);
    assert_eq!(metrics.resamples, 3);
    assert_eq!(closes.get(), 1);
}

/// A storage failure mid-run propagates and still releases the session.
#[test]
fn test_storage_failure_closes_session() {
    let closes = Rc::new(Cell::new(0));
    let orchestrator = Orchestrator::new(config(3, 3));

    let err = orchestrator
        .run_session(FaultySession::guard(Fault::FailAfter(5), &closes), 1)
        .unwrap_err();

    assert!(matches!(err, HarnessError::Storage(EngineError::Backend(_))));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(orchestrator.metrics().snapshot().fetches, 5);
    assert_eq!(closes.get(), 1);
}

/// A passing run closes the session exactly once.
#[test]
fn test_success_closes_once() {
    let closes = Rc::new(Cell::new(0));
    Orchestrator::new(config(2, 3))
        .run_session(FaultySession::guard(Fault::FailAfter(u32::MAX), &closes), 9)
        .unwrap();
    assert_eq!(closes.get(), 1);
}
