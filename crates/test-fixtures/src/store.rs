//! `InstrumentedStore`: the in-memory store plus call counting, failure
//! injection and artificial latency.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use dashmap::DashMap;

use granth_catalog::{CatalogSnapshot, InMemoryCatalogStore};
use granth_core::errors::StoreError;
use granth_core::models::{
    CatalogEntity, ChildKind, Combo, EntityKind, Paper, PdfDocument, SubFolder, Tab,
};
use granth_core::traits::{ICatalogStore, ICatalogWriter};

/// Read operations the store counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    ListPapers,
    ListChildren(ChildKind),
    GetById(EntityKind),
    ListCombos,
}

#[derive(Debug, Default)]
pub struct InstrumentedStore {
    inner: InMemoryCatalogStore,
    calls: DashMap<StoreOp, usize>,
    op_failures: DashMap<StoreOp, StoreError>,
    child_failures: DashMap<(ChildKind, String), StoreError>,
    latency_ms: AtomicU64,
    active_reads: AtomicUsize,
    peak_reads: AtomicUsize,
}

impl InstrumentedStore {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            inner: InMemoryCatalogStore::from_snapshot(snapshot),
            ..Self::default()
        }
    }

    /// Every call to `op` fails with `error`.
    pub fn fail_op(&self, op: StoreOp, error: StoreError) {
        self.op_failures.insert(op, error);
    }

    /// `list_children(kind, parent_id)` fails with `error`.
    pub fn fail_children(&self, kind: ChildKind, parent_id: &str, error: StoreError) {
        self.child_failures.insert((kind, parent_id.to_string()), error);
    }

    pub fn clear_failures(&self) {
        self.op_failures.clear();
        self.child_failures.clear();
    }

    /// Delay every read by `latency`. Pairs with paused tokio time.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn calls(&self, op: StoreOp) -> usize {
        self.calls.get(&op).map(|n| *n).unwrap_or(0)
    }

    pub fn total_reads(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }

    /// Most reads observed in flight at once.
    pub fn peak_concurrent_reads(&self) -> usize {
        self.peak_reads.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &InMemoryCatalogStore {
        &self.inner
    }

    async fn enter(&self, op: StoreOp) -> Result<(), StoreError> {
        *self.calls.entry(op).or_insert(0) += 1;
        let active = self.active_reads.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_reads.fetch_max(active, Ordering::SeqCst);
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        self.active_reads.fetch_sub(1, Ordering::SeqCst);
        match self.op_failures.get(&op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl ICatalogStore for InstrumentedStore {
    async fn list_papers(&self) -> Result<Vec<Paper>, StoreError> {
        self.enter(StoreOp::ListPapers).await?;
        self.inner.list_papers().await
    }

    async fn list_children(
        &self,
        kind: ChildKind,
        parent_id: &str,
    ) -> Result<Vec<CatalogEntity>, StoreError> {
        self.enter(StoreOp::ListChildren(kind)).await?;
        let injected = self
            .child_failures
            .get(&(kind, parent_id.to_string()))
            .map(|e| e.clone());
        if let Some(error) = injected {
            return Err(error);
        }
        self.inner.list_children(kind, parent_id).await
    }

    async fn get_by_id(&self, kind: EntityKind, id: &str) -> Result<CatalogEntity, StoreError> {
        self.enter(StoreOp::GetById(kind)).await?;
        self.inner.get_by_id(kind, id).await
    }

    async fn list_combos(&self) -> Result<Vec<Combo>, StoreError> {
        self.enter(StoreOp::ListCombos).await?;
        self.inner.list_combos().await
    }
}

impl ICatalogWriter for InstrumentedStore {
    async fn insert_paper(&self, paper: Paper) -> Result<(), StoreError> {
        self.inner.insert_paper(paper).await
    }

    async fn insert_tab(&self, tab: Tab) -> Result<(), StoreError> {
        self.inner.insert_tab(tab).await
    }

    async fn insert_sub_folder(&self, sub_folder: SubFolder) -> Result<(), StoreError> {
        self.inner.insert_sub_folder(sub_folder).await
    }

    async fn insert_pdf(&self, pdf: PdfDocument) -> Result<(), StoreError> {
        self.inner.insert_pdf(pdf).await
    }

    async fn insert_combo(&self, combo: Combo) -> Result<(), StoreError> {
        self.inner.insert_combo(combo).await
    }

    async fn count_papers(&self) -> Result<usize, StoreError> {
        self.inner.count_papers().await
    }
}
