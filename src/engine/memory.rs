//! In-process storage engine
//!
//! Relations keep rows in insertion order, which is the natural scan order,
//! so repeated unordered SELECTs are stable. `ORDER BY RANDOM()` shuffles
//! with a session-owned seeded RNG, which makes a run fully reproducible
//! from its seed.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::errors::{EngineError, EngineResult};
use super::relation::{ColumnDef, RelationHandle};
use super::result::{ResultSet, Row};
use super::session::Session;
use super::sql::{Projection, RowOrder, SelectStatement};
use super::value::Value;

#[derive(Debug)]
struct MemoryRelation {
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
}

impl MemoryRelation {
    fn column_index(&self, relation: &str, name: &str) -> EngineResult<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| EngineError::UnknownColumn {
                relation: relation.to_string(),
                column: name.to_string(),
            })
    }
}

/// A session against the in-process engine
#[derive(Debug)]
pub struct MemorySession {
    relations: HashMap<String, MemoryRelation>,
    rng: StdRng,
    closed: bool,
}

impl MemorySession {
    /// Open a session whose `ORDER BY RANDOM()` draws from `seed`
    pub fn open(seed: u64) -> Self {
        Self {
            relations: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
            closed: false,
        }
    }

    fn ensure_open(&self) -> EngineResult<()> {
        if self.closed {
            Err(EngineError::SessionClosed)
        } else {
            Ok(())
        }
    }
}

impl Session for MemorySession {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn create_session_relation(
        &mut self,
        name: &str,
        columns: &[ColumnDef],
    ) -> EngineResult<RelationHandle> {
        self.ensure_open()?;

        if self.relations.contains_key(name) {
            return Err(EngineError::RelationExists(name.to_string()));
        }

        self.relations.insert(
            name.to_string(),
            MemoryRelation {
                columns: columns.to_vec(),
                rows: Vec::new(),
            },
        );

        Ok(RelationHandle::new(name, columns.to_vec()))
    }

    fn insert_rows(
        &mut self,
        relation: &RelationHandle,
        column_names: &[String],
        rows: &[Vec<Value>],
    ) -> EngineResult<usize> {
        self.ensure_open()?;

        let target = self
            .relations
            .get_mut(relation.name())
            .ok_or_else(|| EngineError::RelationNotFound(relation.name().to_string()))?;

        let declared: Vec<&str> = target.columns.iter().map(|c| c.name.as_str()).collect();
        if declared != column_names.iter().map(String::as_str).collect::<Vec<_>>() {
            return Err(EngineError::ColumnMismatch {
                relation: relation.name().to_string(),
                expected: declared.join(", "),
                actual: column_names.join(", "),
            });
        }

        // Validate the whole batch before touching the relation
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != target.columns.len() {
                return Err(EngineError::ArityMismatch {
                    row: row_index,
                    expected: target.columns.len(),
                    actual: row.len(),
                });
            }
            for (value, column) in row.iter().zip(&target.columns) {
                if value.column_type() != column.column_type {
                    return Err(EngineError::TypeMismatch {
                        column: column.name.clone(),
                        expected: column.column_type.type_name(),
                        actual: value.column_type().type_name(),
                    });
                }
            }
        }

        target.rows.extend(rows.iter().cloned());
        Ok(rows.len())
    }

    fn query(&mut self, sql: &str) -> EngineResult<ResultSet> {
        self.ensure_open()?;

        let stmt = SelectStatement::parse(sql)?;
        let relation = self
            .relations
            .get(&stmt.relation)
            .ok_or_else(|| EngineError::RelationNotFound(stmt.relation.clone()))?;

        let indices: Vec<usize> = match &stmt.projection {
            Projection::All => (0..relation.columns.len()).collect(),
            Projection::Columns(names) => names
                .iter()
                .map(|name| relation.column_index(&stmt.relation, name))
                .collect::<EngineResult<_>>()?,
        };

        let mut rows: Vec<Row> = relation
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        if stmt.order == RowOrder::Random {
            rows.shuffle(&mut self.rng);
        }

        Ok(ResultSet::new(rows))
    }

    fn close(&mut self) -> EngineResult<()> {
        if !self.closed {
            self.relations.clear();
            self.closed = true;
        }
        Ok(())
    }
}
