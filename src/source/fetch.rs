//! The four fetch variants over a materialized relation

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::{
    EngineResult, Projection, RelationHandle, ResultSet, RowOrder, SelectStatement, Session,
};

use super::regime::PermutationRegime;

/// One fetch of the relation
#[derive(Debug, Clone)]
pub struct Fetch {
    /// Regime the fetch was issued under
    pub regime: PermutationRegime,
    /// Canonical column index at each projected position
    pub column_order: Vec<usize>,
    /// Query text sent to the session
    pub sql: String,
    /// Rows as returned by the engine
    pub result: ResultSet,
}

/// Issues regime-specific queries against one relation.
///
/// Column permutations are drawn from the injected `rng`, fresh on every
/// call. Row permutations are delegated to the engine via
/// `ORDER BY RANDOM()`, which the engine re-samples on every call.
pub struct ResultSource<'a, S: Session + ?Sized, R: Rng> {
    session: &'a mut S,
    relation: &'a RelationHandle,
    rng: R,
}

impl<'a, S: Session + ?Sized, R: Rng> ResultSource<'a, S, R> {
    pub fn new(session: &'a mut S, relation: &'a RelationHandle, rng: R) -> Self {
        Self {
            session,
            relation,
            rng,
        }
    }

    /// Schema column order, natural row order
    pub fn fetch_plain(&mut self) -> EngineResult<Fetch> {
        self.fetch(PermutationRegime::Plain)
    }

    /// Schema column order, engine-randomized rows
    pub fn fetch_row_random(&mut self) -> EngineResult<Fetch> {
        self.fetch(PermutationRegime::RowRandom)
    }

    /// Fresh random column order, natural row order
    pub fn fetch_column_random(&mut self) -> EngineResult<Fetch> {
        self.fetch(PermutationRegime::ColumnRandom)
    }

    /// Fresh random column order, engine-randomized rows
    pub fn fetch_full_random(&mut self) -> EngineResult<Fetch> {
        self.fetch(PermutationRegime::FullRandom)
    }

    /// Fetch the whole relation under `regime`
    pub fn fetch(&mut self, regime: PermutationRegime) -> EngineResult<Fetch> {
        let mut column_order: Vec<usize> = (0..self.relation.columns().len()).collect();
        if regime.randomizes_columns() {
            column_order.shuffle(&mut self.rng);
        }

        let order = if regime.randomizes_rows() {
            RowOrder::Random
        } else {
            RowOrder::Natural
        };

        let columns = self.relation.columns();
        let projection = Projection::Columns(
            column_order
                .iter()
                .map(|&i| columns[i].name.clone())
                .collect(),
        );
        let sql = SelectStatement::new(projection, self.relation.name(), order).render();

        let result = self.session.query(&sql)?;

        Ok(Fetch {
            regime,
            column_order,
            sql,
            result,
        })
    }
}
