//! Canonical dataset generation
//!
//! Column `n` is named `c{n+1}` and typed `ColumnType::for_index(n)`.
//! Cell `(r, c)` holds `r*C + c + 1`, which is injective over the whole
//! dataset: no two cells share a value.

use crate::engine::{ColumnDef, ColumnType, EngineResult, RelationHandle, Row, Session, Value};

use super::shape::DatasetShape;

/// Value of cell `(row, column)` for the given shape
pub fn cell(shape: &DatasetShape, row: usize, column: usize) -> i64 {
    (row * shape.columns() + column + 1) as i64
}

/// Name of the 0-based column `index`
pub fn column_name(index: usize) -> String {
    format!("c{}", index + 1)
}

/// Builds the canonical dataset for a shape
#[derive(Debug, Clone, Copy)]
pub struct DatasetGenerator {
    shape: DatasetShape,
}

impl DatasetGenerator {
    pub fn new(shape: DatasetShape) -> Self {
        Self { shape }
    }

    /// Column schema: cyclic types, all NOT NULL
    pub fn schema(&self) -> Vec<ColumnDef> {
        (0..self.shape.columns())
            .map(|n| ColumnDef::required(column_name(n), ColumnType::for_index(n)))
            .collect()
    }

    /// Build the dataset in memory
    pub fn generate(&self) -> CanonicalDataset {
        let schema = self.schema();
        let rows = (0..self.shape.rows())
            .map(|r| {
                schema
                    .iter()
                    .enumerate()
                    .map(|(c, def)| Value::from_number(def.column_type, cell(&self.shape, r, c)))
                    .collect()
            })
            .collect();

        CanonicalDataset {
            shape: self.shape,
            schema,
            rows,
        }
    }
}

/// The run's source of truth. Never mutated after generation.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalDataset {
    shape: DatasetShape,
    schema: Vec<ColumnDef>,
    rows: Vec<Row>,
}

impl CanonicalDataset {
    pub fn shape(&self) -> &DatasetShape {
        &self.shape
    }

    pub fn schema(&self) -> &[ColumnDef] {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column names in schema order
    pub fn column_names(&self) -> Vec<String> {
        self.schema.iter().map(|c| c.name.clone()).collect()
    }

    /// Create the session-scoped relation and bulk-insert every row
    pub fn materialize(
        &self,
        session: &mut dyn Session,
        relation: &str,
    ) -> EngineResult<RelationHandle> {
        let handle = session.create_session_relation(relation, &self.schema)?;
        session.insert_rows(&handle, &self.column_names(), &self.rows)?;
        Ok(handle)
    }

    /// Invert the cell function: `(row, column)` holding `value`, if any
    pub fn locate(&self, value: &Value) -> Option<(usize, usize)> {
        let n = value.as_integer()?;
        if n < 1 {
            return None;
        }
        let offset = usize::try_from(n - 1).ok()?;
        if offset >= self.shape.cells() {
            return None;
        }
        Some((offset / self.shape.columns(), offset % self.shape.columns()))
    }
}
