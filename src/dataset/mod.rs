//! Canonical dataset
//!
//! One dataset per run, generated from a validated [`DatasetShape`] and
//! materialized into a session-scoped relation. The dataset is immutable
//! once generated.
//!
//! # Invariants
//!
//! - Every cell value is unique across the dataset
//! - Column types cycle integer, float, text
//! - Invalid shapes fail with [`PreconditionError`] before any I/O

mod errors;
mod generator;
mod layout;
mod shape;

pub use errors::{PreconditionCode, PreconditionError, PreconditionResult};
pub use generator::{cell, column_name, CanonicalDataset, DatasetGenerator};
pub use layout::Layout;
pub use shape::{DatasetShape, MAX_CELLS};
