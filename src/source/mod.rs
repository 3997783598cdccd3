//! Result sources
//!
//! Four ways to read the whole relation back, one per
//! [`PermutationRegime`]. Every fetch returns the same multiset of rows as
//! the plain fetch; only positions differ.

mod fetch;
mod regime;

pub use fetch::{Fetch, ResultSource};
pub use regime::PermutationRegime;
