//! Result set comparison
//!
//! Four strictness modes, one per combination of enforcing row order and
//! enforcing column order. Values are compared by canonical text only.
//!
//! # Laws
//!
//! - Symmetric in its two arguments
//! - Monotone: relaxing a mode never turns equal into not equal

mod comparator;
mod mode;

pub use comparator::{compare, compare_all, result_sets_equal};
pub use mode::CompareMode;
