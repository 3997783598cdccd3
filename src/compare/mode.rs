//! Strictness modes

use std::fmt;

use serde::Serialize;

/// Which positional orders a comparison enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CompareMode {
    pub enforce_row_order: bool,
    pub enforce_column_order: bool,
}

impl CompareMode {
    /// Exact positional identity
    pub const STRICT: CompareMode = CompareMode::new(true, true);
    /// Row order relaxed
    pub const ANY_ROW_ORDER: CompareMode = CompareMode::new(false, true);
    /// Column order relaxed
    pub const ANY_COLUMN_ORDER: CompareMode = CompareMode::new(true, false);
    /// Unordered bags of unordered rows
    pub const UNORDERED: CompareMode = CompareMode::new(false, false);

    /// The fixed evaluation order: TT, FT, TF, FF
    pub const ALL: [CompareMode; 4] = [
        CompareMode::STRICT,
        CompareMode::ANY_ROW_ORDER,
        CompareMode::ANY_COLUMN_ORDER,
        CompareMode::UNORDERED,
    ];

    pub const fn new(enforce_row_order: bool, enforce_column_order: bool) -> Self {
        Self {
            enforce_row_order,
            enforce_column_order,
        }
    }

    /// Two-letter label, row flag first (`TT`, `FT`, `TF`, `FF`)
    pub fn label(&self) -> &'static str {
        match (self.enforce_row_order, self.enforce_column_order) {
            (true, true) => "TT",
            (false, true) => "FT",
            (true, false) => "TF",
            (false, false) => "FF",
        }
    }

    /// Position of this mode in [`CompareMode::ALL`]
    pub fn index(&self) -> usize {
        match (self.enforce_row_order, self.enforce_column_order) {
            (true, true) => 0,
            (false, true) => 1,
            (true, false) => 2,
            (false, false) => 3,
        }
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
