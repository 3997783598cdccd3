//! Result sets returned by a storage session

use sha2::{Digest, Sha256};

use super::value::Value;

/// A single row of typed values
pub type Row = Vec<Value>;

/// Ordered rows of ordered typed values, as returned by `Session::query`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    /// Creates a result set from rows in result order
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Creates an empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rows in result order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the result set, returning its rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows were returned
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the first row (0 for an empty result)
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Rows rendered as canonical text, positional order preserved
    pub fn canonical_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|v| v.canonical_text().into_owned()).collect())
            .collect()
    }

    /// SHA-256 over the canonical rows, hex encoded.
    ///
    /// Positional: two permutations of the same content fingerprint
    /// differently.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for row in &self.rows {
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    hasher.update([0x1f]);
                }
                hasher.update(value.canonical_text().as_bytes());
            }
            hasher.update([0x1e]);
        }
        hex_encode(&hasher.finalize())
    }
}

impl From<Vec<Row>> for ResultSet {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}
