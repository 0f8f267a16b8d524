//! Store adapters: the in-memory document store and its JSON snapshot format.

pub mod memory;
pub mod snapshot;

pub use memory::InMemoryCatalogStore;
pub use snapshot::CatalogSnapshot;
