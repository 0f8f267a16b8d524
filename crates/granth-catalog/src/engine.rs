//! CatalogEngine — cached, per-scope tree resolution over an `ICatalogStore`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use moka::future::Cache;
use tracing::{debug, info, warn};

use granth_core::config::CatalogConfig;
use granth_core::errors::StoreError;
use granth_core::models::{CatalogTree, Combo, EntityKind, PdfDocument, Scope};
use granth_core::traits::ICatalogStore;

use crate::assembly::fan_out::with_timeout;
use crate::assembly::{
    MaterializedTree, TreeAssembler, TreeLoadError, TreeStatus, ViewTicket, ViewTracker,
};
use crate::combo;
use crate::search;

/// The catalog resolver.
///
/// One materialized tree per scope, kept until refreshed. Concurrent callers
/// asking for the same scope share one assembly.
pub struct CatalogEngine<S: ICatalogStore> {
    store: Arc<S>,
    assembler: TreeAssembler<S>,
    trees: Cache<Scope, Arc<MaterializedTree>>,
    in_flight: DashMap<Scope, usize>,
    last_errors: DashMap<Scope, TreeLoadError>,
    views: ViewTracker,
    /// Per-scope refresh counters. A scope's epoch is its own counter plus
    /// `global_epoch`; a tree stamped below it predates a refresh.
    epochs: DashMap<Scope, u64>,
    global_epoch: AtomicU64,
    read_timeout: Duration,
}

impl<S: ICatalogStore> CatalogEngine<S> {
    pub fn new(store: Arc<S>, config: &CatalogConfig) -> Self {
        let trees = match config.max_cached_scopes {
            Some(capacity) => Cache::builder().max_capacity(capacity).build(),
            None => Cache::builder().build(),
        };
        Self {
            assembler: TreeAssembler::new(Arc::clone(&store), config),
            store,
            trees,
            in_flight: DashMap::new(),
            last_errors: DashMap::new(),
            views: ViewTracker::new(),
            epochs: DashMap::new(),
            global_epoch: AtomicU64::new(0),
            read_timeout: config.read_timeout(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Resolve the tree for `scope`, assembling it on first use.
    pub async fn get_tree(&self, scope: &Scope) -> TreeStatus {
        match self.load(scope).await {
            Ok(tree) => TreeStatus::Ready(tree),
            Err(e) => TreeStatus::Error(TreeLoadError::from(&e)),
        }
    }

    /// Current status of `scope` without starting a load.
    pub async fn status(&self, scope: &Scope) -> TreeStatus {
        if let Some(tree) = self.trees.get(scope).await {
            return TreeStatus::Ready(tree);
        }
        if self.in_flight.get(scope).is_some_and(|n| *n > 0) {
            return TreeStatus::Loading;
        }
        match self.last_errors.get(scope) {
            Some(e) => TreeStatus::Error(e.clone()),
            None => TreeStatus::Idle,
        }
    }

    pub fn open_view(&self, scope: &Scope) -> ViewTicket {
        self.views.open(scope)
    }

    pub fn abandon_view(&self, ticket: &ViewTicket) {
        self.views.abandon(ticket);
    }

    /// Load on behalf of a view. `None` when the view was abandoned or
    /// superseded while the load ran; the tree itself is still cached.
    pub async fn load_view(&self, ticket: &ViewTicket) -> Option<TreeStatus> {
        let status = self.get_tree(ticket.scope()).await;
        if self.views.is_current(ticket) {
            Some(status)
        } else {
            debug!(
                scope = %ticket.scope(),
                generation = ticket.generation(),
                "view went stale while loading; result discarded"
            );
            None
        }
    }

    /// Drop the cached tree for `scope`. A paper scope also drops the
    /// all-papers tree, which contains it.
    pub async fn refresh(&self, scope: &Scope) {
        let paper_id = match scope {
            Scope::All => return self.refresh_all(),
            Scope::Paper(id) => id,
        };
        self.epochs.entry(Scope::All).or_insert(0);
        self.epochs.entry(scope.clone()).or_insert(0);
        for mut epoch in self.epochs.iter_mut() {
            if epoch.key().covers_paper(paper_id) {
                *epoch.value_mut() += 1;
            }
        }
        for covered in [scope, &Scope::All] {
            self.trees.invalidate(covered).await;
            self.last_errors.remove(covered);
        }
        info!(scope = %scope, "catalog tree refreshed");
    }

    pub fn refresh_all(&self) {
        self.global_epoch.fetch_add(1, Ordering::SeqCst);
        self.trees.invalidate_all();
        self.last_errors.clear();
        info!("all catalog trees refreshed");
    }

    /// Filter the tree for `scope` by a search term.
    pub async fn search(&self, scope: &Scope, query: &str) -> Result<CatalogTree, StoreError> {
        let tree = self.load(scope).await?;
        Ok(search::search_tree(&tree.tree, query))
    }

    /// All combos, newest first.
    pub async fn list_combos(&self) -> Result<Vec<Combo>, StoreError> {
        with_timeout(self.read_timeout, self.store.list_combos()).await
    }

    pub async fn get_combo(&self, combo_id: &str) -> Result<Combo, StoreError> {
        let read = self.store.get_by_id(EntityKind::Combo, combo_id);
        let entity = with_timeout(self.read_timeout, read).await?;
        let kind = entity.kind();
        entity.into_combo().ok_or_else(|| StoreError::InvalidRecord {
            kind: EntityKind::Combo,
            id: combo_id.to_string(),
            reason: format!("store returned a {kind} record"),
        })
    }

    /// Member PDFs of `combo`, looked up in the all-papers tree.
    pub async fn resolve_combo(&self, combo: &Combo) -> Result<Vec<PdfDocument>, StoreError> {
        let tree = self.load(&Scope::All).await?;
        Ok(combo::resolve(combo, &tree.index))
    }

    fn epoch(&self, scope: &Scope) -> u64 {
        let own = self.epochs.get(scope).map_or(0, |e| *e);
        self.global_epoch.load(Ordering::SeqCst) + own
    }

    /// Cached tree for `scope`, never one assembled before the caller's
    /// last observed refresh.
    async fn load(&self, scope: &Scope) -> Result<Arc<MaterializedTree>, StoreError> {
        let requested = self.epoch(scope);
        if let Some(tree) = self.trees.get(scope).await {
            if tree.epoch >= requested {
                return Ok(tree);
            }
            self.trees.invalidate(scope).await;
        }

        let tree = self.load_shared(scope).await?;
        if tree.epoch >= requested {
            return Ok(tree);
        }
        debug!(scope = %scope, "joined a load that predates a refresh; loading again");
        self.trees.invalidate(scope).await;
        self.load_shared(scope).await
    }

    /// One coalesced assembly. A result overtaken by a refresh is returned
    /// to its callers but not kept.
    async fn load_shared(&self, scope: &Scope) -> Result<Arc<MaterializedTree>, StoreError> {
        let result = {
            let _loading = InFlight::enter(&self.in_flight, scope);
            self.trees
                .try_get_with(scope.clone(), async {
                    let started = self.epoch(scope);
                    self.assembler.assemble(scope).await.map(|mut tree| {
                        tree.epoch = started;
                        Arc::new(tree)
                    })
                })
                .await
        };

        match result {
            Ok(tree) => {
                self.last_errors.remove(scope);
                if tree.epoch < self.epoch(scope) {
                    debug!(scope = %scope, "refreshed during load; result not kept");
                    self.trees.invalidate(scope).await;
                }
                Ok(tree)
            }
            Err(e) => {
                let error = StoreError::clone(&e);
                warn!(scope = %scope, error = %error, "catalog tree load failed");
                self.last_errors
                    .insert(scope.clone(), TreeLoadError::from(&error));
                Err(error)
            }
        }
    }
}

/// Counts callers waiting on a scope's load for `status()`.
struct InFlight<'a> {
    counts: &'a DashMap<Scope, usize>,
    scope: Scope,
}

impl<'a> InFlight<'a> {
    fn enter(counts: &'a DashMap<Scope, usize>, scope: &Scope) -> Self {
        *counts.entry(scope.clone()).or_insert(0) += 1;
        Self {
            counts,
            scope: scope.clone(),
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counts.remove_if_mut(&self.scope, |_, n| {
            *n = n.saturating_sub(1);
            *n == 0
        });
    }
}
