//! Typed cell values and column types
//!
//! Engines may hand back a value in a different concrete representation
//! than the one that was inserted (an integer stored in a REAL column comes
//! back as `Float(2.0)`, a TEXT column hands back `Text("3")`). Equality in
//! this crate is therefore always taken over [`Value::canonical_text`].

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Float,
    /// UTF-8 text
    Text,
}

impl ColumnType {
    /// Types assigned to columns in order, repeating
    pub const CYCLE: [ColumnType; 3] = [ColumnType::Integer, ColumnType::Float, ColumnType::Text];

    /// Type of the column at 0-based `index`
    pub fn for_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
        }
    }

    /// SQL type used in DDL
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Float => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Build the value of `column_type` that carries the number `n`
    pub fn from_number(column_type: ColumnType, n: i64) -> Self {
        match column_type {
            ColumnType::Integer => Value::Integer(n),
            ColumnType::Float => Value::Float(n as f64),
            ColumnType::Text => Value::Text(n.to_string()),
        }
    }

    /// Type tag of this value
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Integer(_) => ColumnType::Integer,
            Value::Float(_) => ColumnType::Float,
            Value::Text(_) => ColumnType::Text,
        }
    }

    /// Representation-agnostic textual form.
    ///
    /// Integral floats render without a fractional part, so `Float(7.0)`,
    /// `Integer(7)` and `Text("7")` all canonicalize to `"7"`.
    pub fn canonical_text(&self) -> Cow<'_, str> {
        match self {
            Value::Integer(i) => Cow::Owned(i.to_string()),
            // -0.0 and 0.0 must not diverge
            Value::Float(f) if *f == 0.0 => Cow::Borrowed("0"),
            Value::Float(f) => Cow::Owned(f.to_string()),
            Value::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Parse the canonical text back into an integer, if it is one
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Value::Float(_) => None,
            Value::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_text())
    }
}
