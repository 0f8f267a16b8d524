//! In-memory catalog store.
//!
//! Applies the same ordering rules the hosted document store is queried with,
//! so the resolver sees identical sibling order from either backend.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use granth_core::errors::StoreError;
use granth_core::models::{
    CatalogEntity, ChildKind, Combo, EntityKind, Paper, PdfDocument, SubFolder, Tab,
};
use granth_core::traits::{ICatalogStore, ICatalogWriter};

use super::CatalogSnapshot;

/// Catalog store backed by a `CatalogSnapshot` behind a lock.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    data: RwLock<CatalogSnapshot>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        debug!(records = snapshot.record_count(), "in-memory catalog store loaded");
        Self {
            data: RwLock::new(snapshot),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        CatalogSnapshot::from_json(json).map(Self::from_snapshot)
    }

    /// Copy of everything currently stored.
    pub fn snapshot(&self) -> Result<CatalogSnapshot, StoreError> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogSnapshot>, StoreError> {
        self.data
            .read()
            .map_err(|e| StoreError::unavailable(format!("catalog lock poisoned: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogSnapshot>, StoreError> {
        self.data
            .write()
            .map_err(|e| StoreError::unavailable(format!("catalog lock poisoned: {e}")))
    }

    fn papers_sorted(data: &CatalogSnapshot) -> Vec<Paper> {
        let mut papers = data.papers.clone();
        papers.sort_by(|a, b| {
            a.paper_number
                .cmp(&b.paper_number)
                .then_with(|| a.id.cmp(&b.id))
        });
        papers
    }

    fn children_sorted(data: &CatalogSnapshot, kind: ChildKind, parent_id: &str) -> Vec<CatalogEntity> {
        match kind {
            ChildKind::Tab => {
                let mut tabs: Vec<&Tab> =
                    data.tabs.iter().filter(|t| t.paper_id == parent_id).collect();
                tabs.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
                tabs.into_iter().cloned().map(CatalogEntity::Tab).collect()
            }
            ChildKind::SubFolder => {
                let mut folders: Vec<&SubFolder> = data
                    .sub_folders
                    .iter()
                    .filter(|s| s.tab_id == parent_id)
                    .collect();
                folders.sort_by(|a, b| {
                    a.created_at
                        .cmp(&b.created_at)
                        .then_with(|| a.id.cmp(&b.id))
                });
                folders.into_iter().cloned().map(CatalogEntity::SubFolder).collect()
            }
            ChildKind::Pdf => {
                let mut pdfs: Vec<&PdfDocument> = data
                    .pdfs
                    .iter()
                    .filter(|p| p.sub_folder_id == parent_id)
                    .collect();
                pdfs.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
                pdfs.into_iter().cloned().map(CatalogEntity::Pdf).collect()
            }
        }
    }

    fn find(data: &CatalogSnapshot, kind: EntityKind, id: &str) -> Option<CatalogEntity> {
        match kind {
            EntityKind::Paper => data.papers.iter().find(|p| p.id == id).cloned().map(CatalogEntity::Paper),
            EntityKind::Tab => data.tabs.iter().find(|t| t.id == id).cloned().map(CatalogEntity::Tab),
            EntityKind::SubFolder => data
                .sub_folders
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .map(CatalogEntity::SubFolder),
            EntityKind::Pdf => data.pdfs.iter().find(|p| p.id == id).cloned().map(CatalogEntity::Pdf),
            EntityKind::Combo => data.combos.iter().find(|c| c.id == id).cloned().map(CatalogEntity::Combo),
        }
    }

    fn ensure_new(data: &CatalogSnapshot, kind: EntityKind, id: &str) -> Result<(), StoreError> {
        if Self::find(data, kind, id).is_some() {
            return Err(StoreError::InvalidRecord {
                kind,
                id: id.to_string(),
                reason: "duplicate id".to_string(),
            });
        }
        Ok(())
    }
}

impl ICatalogStore for InMemoryCatalogStore {
    async fn list_papers(&self) -> Result<Vec<Paper>, StoreError> {
        let data = self.read()?;
        Ok(Self::papers_sorted(&data))
    }

    async fn list_children(
        &self,
        kind: ChildKind,
        parent_id: &str,
    ) -> Result<Vec<CatalogEntity>, StoreError> {
        let data = self.read()?;
        Ok(Self::children_sorted(&data, kind, parent_id))
    }

    async fn get_by_id(&self, kind: EntityKind, id: &str) -> Result<CatalogEntity, StoreError> {
        let data = self.read()?;
        Self::find(&data, kind, id).ok_or_else(|| StoreError::not_found(kind, id))
    }

    async fn list_combos(&self) -> Result<Vec<Combo>, StoreError> {
        let data = self.read()?;
        let mut combos = data.combos.clone();
        combos.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(combos)
    }
}

impl ICatalogWriter for InMemoryCatalogStore {
    async fn insert_paper(&self, paper: Paper) -> Result<(), StoreError> {
        let mut data = self.write()?;
        Self::ensure_new(&data, EntityKind::Paper, &paper.id)?;
        data.papers.push(paper);
        Ok(())
    }

    async fn insert_tab(&self, tab: Tab) -> Result<(), StoreError> {
        let mut data = self.write()?;
        Self::ensure_new(&data, EntityKind::Tab, &tab.id)?;
        data.tabs.push(tab);
        Ok(())
    }

    async fn insert_sub_folder(&self, sub_folder: SubFolder) -> Result<(), StoreError> {
        let mut data = self.write()?;
        Self::ensure_new(&data, EntityKind::SubFolder, &sub_folder.id)?;
        data.sub_folders.push(sub_folder);
        Ok(())
    }

    async fn insert_pdf(&self, pdf: PdfDocument) -> Result<(), StoreError> {
        let mut data = self.write()?;
        Self::ensure_new(&data, EntityKind::Pdf, &pdf.id)?;
        data.pdfs.push(pdf);
        Ok(())
    }

    async fn insert_combo(&self, combo: Combo) -> Result<(), StoreError> {
        let mut data = self.write()?;
        Self::ensure_new(&data, EntityKind::Combo, &combo.id)?;
        data.combos.push(combo);
        Ok(())
    }

    async fn count_papers(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.papers.len())
    }
}
