//! `ICatalogStore` / `ICatalogWriter` — the document-store boundary.
//!
//! The resolver only reads. Writes belong to the admin console and go through
//! `ICatalogWriter`. Futures are `Send` so sibling reads can be spawned onto
//! the runtime concurrently.

use std::future::Future;

use crate::errors::StoreError;
use crate::models::{CatalogEntity, ChildKind, Combo, EntityKind, Paper, PdfDocument, SubFolder, Tab};

/// Ordered read access to the catalog documents.
pub trait ICatalogStore: Send + Sync + 'static {
    /// All papers, paper number ascending, ties by id.
    fn list_papers(&self) -> impl Future<Output = Result<Vec<Paper>, StoreError>> + Send;

    /// Children of one parent: tabs by name, sub-folders by creation time,
    /// PDFs by name.
    fn list_children(
        &self,
        kind: ChildKind,
        parent_id: &str,
    ) -> impl Future<Output = Result<Vec<CatalogEntity>, StoreError>> + Send;

    /// One record by id, `StoreError::NotFound` when absent.
    fn get_by_id(
        &self,
        kind: EntityKind,
        id: &str,
    ) -> impl Future<Output = Result<CatalogEntity, StoreError>> + Send;

    /// All combos, newest first.
    fn list_combos(&self) -> impl Future<Output = Result<Vec<Combo>, StoreError>> + Send;
}

/// Write access for catalog authoring.
pub trait ICatalogWriter: Send + Sync + 'static {
    fn insert_paper(&self, paper: Paper) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn insert_tab(&self, tab: Tab) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn insert_sub_folder(
        &self,
        sub_folder: SubFolder,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn insert_pdf(&self, pdf: PdfDocument) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn insert_combo(&self, combo: Combo) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn count_papers(&self) -> impl Future<Output = Result<usize, StoreError>> + Send;
}
