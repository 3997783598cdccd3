//! Relation definitions shared by every backend

use serde::{Deserialize, Serialize};

use super::value::ColumnType;

/// Column definition for `Session::create_session_relation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name
    pub name: String,
    /// Declared column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Whether NULL is permitted
    pub nullable: bool,
}

impl ColumnDef {
    /// A NOT NULL column
    pub fn required(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
        }
    }

    /// DDL fragment, e.g. `"c1" INTEGER NOT NULL`
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", quote_ident(&self.name), self.column_type.sql_type());
        if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        sql
    }
}

/// Handle to a session-scoped relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationHandle {
    name: String,
    columns: Vec<ColumnDef>,
}

impl RelationHandle {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Relation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column definitions in declaration order
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// True for `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Double-quote an identifier, doubling embedded quotes
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
