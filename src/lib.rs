//! permcheck - differential checking of query results under row and
//! column permutations
//!
//! A canonical dataset with globally unique cell values is materialized in
//! a session-scoped relation, fetched back under four ordering regimes, and
//! every pair of fetches is compared in four strictness modes against a
//! fixed expectation table.

pub mod cli;
pub mod compare;
pub mod dataset;
pub mod engine;
pub mod harness;
pub mod matrix;
pub mod observability;
pub mod source;
