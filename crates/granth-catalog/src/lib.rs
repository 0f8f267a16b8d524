//! # granth-catalog
//!
//! Catalog resolution for Granth.
//! Reads Paper → Tab → SubFolder → PdfDocument out of a document store,
//! materializes it once per scope, prunes it by search term and resolves
//! combos through a by-id index.

pub mod assembly;
pub mod combo;
pub mod engine;
pub mod search;
pub mod store;

pub use assembly::{MaterializedTree, TreeIndex, TreeLoadError, TreeStatus, ViewTicket};
pub use engine::CatalogEngine;
pub use search::{search_combos, search_tree, SearchQuery};
pub use store::{CatalogSnapshot, InMemoryCatalogStore};
