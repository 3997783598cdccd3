//! SQLite storage engine via rusqlite (bundled)
//!
//! The dataset lives in a `CREATE TEMP TABLE`, so it disappears with the
//! connection even when the DSN points at a file. SQLite's `RANDOM()` is
//! seeded by SQLite itself; row shuffles against this backend are not
//! reproducible from the harness seed.

use std::path::{Path, PathBuf};

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqliteValue};
use rusqlite::Connection;

use super::errors::{EngineError, EngineResult};
use super::relation::{quote_ident, ColumnDef, RelationHandle};
use super::result::{ResultSet, Row};
use super::session::Session;
use super::value::Value;

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Integer(i) => ToSqlOutput::Owned(SqliteValue::Integer(*i)),
            Value::Float(f) => ToSqlOutput::Owned(SqliteValue::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(rusqlite::types::ValueRef::Text(s.as_bytes())),
        })
    }
}

/// A session against SQLite
pub struct SqliteSession {
    conn: Option<Connection>,
    location: Option<PathBuf>,
}

impl SqliteSession {
    /// Open a private in-memory database
    pub fn open_in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| EngineError::Open(e.to_string()))?;
        Ok(Self {
            conn: Some(conn),
            location: None,
        })
    }

    /// Open (or create) a database file
    pub fn open(path: &Path) -> EngineResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| EngineError::Open(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            conn: Some(conn),
            location: Some(path.to_path_buf()),
        })
    }

    /// Database file, if not in memory
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    fn conn(&mut self) -> EngineResult<&mut Connection> {
        self.conn.as_mut().ok_or(EngineError::SessionClosed)
    }

    fn temp_table_exists(conn: &Connection, name: &str) -> EngineResult<bool> {
        let count: i64 = conn.query_row(
            "SELECT count(*) FROM temp.sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn from_sqlite(column: usize, value: SqliteValue) -> EngineResult<Value> {
    match value {
        SqliteValue::Integer(i) => Ok(Value::Integer(i)),
        SqliteValue::Real(f) => Ok(Value::Float(f)),
        SqliteValue::Text(s) => Ok(Value::Text(s)),
        SqliteValue::Null => Err(EngineError::UnsupportedValue { column, kind: "NULL" }),
        SqliteValue::Blob(_) => Err(EngineError::UnsupportedValue { column, kind: "BLOB" }),
    }
}

impl Session for SqliteSession {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn create_session_relation(
        &mut self,
        name: &str,
        columns: &[ColumnDef],
    ) -> EngineResult<RelationHandle> {
        let conn = self.conn()?;

        if Self::temp_table_exists(conn, name)? {
            return Err(EngineError::RelationExists(name.to_string()));
        }

        let definitions = columns
            .iter()
            .map(ColumnDef::to_sql)
            .collect::<Vec<_>>()
            .join(", ");
        conn.execute(
            &format!("CREATE TEMP TABLE {} ({})", quote_ident(name), definitions),
            [],
        )?;

        Ok(RelationHandle::new(name, columns.to_vec()))
    }

    fn insert_rows(
        &mut self,
        relation: &RelationHandle,
        column_names: &[String],
        rows: &[Vec<Value>],
    ) -> EngineResult<usize> {
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != column_names.len() {
                return Err(EngineError::ArityMismatch {
                    row: row_index,
                    expected: column_names.len(),
                    actual: row.len(),
                });
            }
        }

        let columns = column_names
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=column_names.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO temp.{} ({}) VALUES ({})",
            quote_ident(relation.name()),
            columns,
            placeholders
        );

        let conn = self.conn()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in rows {
                stmt.execute(rusqlite::params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;

        Ok(rows.len())
    }

    fn query(&mut self, sql: &str) -> EngineResult<ResultSet> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql.trim())?;
        let column_count = stmt.column_count();

        let raw: Vec<Vec<SqliteValue>> = stmt
            .query_map([], |row| {
                (0..column_count)
                    .map(|i| row.get::<_, SqliteValue>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<rusqlite::Result<_>>()?;

        let rows = raw
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .enumerate()
                    .map(|(i, v)| from_sqlite(i, v))
                    .collect::<EngineResult<Row>>()
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(ResultSet::new(rows))
    }

    fn close(&mut self) -> EngineResult<()> {
        match self.conn.take() {
            Some(conn) => conn.close().map_err(|(_, e)| EngineError::from(e)),
            None => Ok(()),
        }
    }
}
