//! Whole-branch search over a materialized tree and over the combo list.

mod filter;
mod query;

pub use filter::{search_combos, search_tree};
pub use query::SearchQuery;
