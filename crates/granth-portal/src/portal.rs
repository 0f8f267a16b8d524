//! Portal — one handle over the catalog engine, the session manager, the
//! access gate and authoring.

use std::sync::Arc;

use tracing::info;

use granth_access::{
    AccessGate, AccessState, AuthEvent, CancelSignal, GateDecision, GatedItem, ProviderGateway,
    SessionContext, SessionManager, UnlockOutcome,
};
use granth_catalog::{search_combos, CatalogEngine, TreeStatus, ViewTicket};
use granth_core::config::GranthConfig;
use granth_core::errors::GranthResult;
use granth_core::models::{CatalogTree, Combo, Paper, PdfDocument, Scope, SubFolder, Tab};
use granth_core::traits::{ICatalogStore, ICatalogWriter, ICheckout, IOrderGateway};

use crate::authoring::{CatalogAuthoring, NewCombo, NewPaper, NewPdf, NewSubFolder, NewTab};

pub struct Portal<S: ICatalogStore, G, C> {
    config: GranthConfig,
    catalog: Arc<CatalogEngine<S>>,
    authoring: CatalogAuthoring<S>,
    sessions: SessionManager,
    gate: AccessGate<G, C>,
}

impl<S, C> Portal<S, ProviderGateway, C>
where
    S: ICatalogStore + ICatalogWriter,
    C: ICheckout,
{
    /// Portal backed by the hosted payment provider. Missing credentials
    /// disable paid unlocks only.
    pub fn hosted(config: GranthConfig, store: Arc<S>, checkout: Arc<C>) -> GranthResult<Self> {
        let orders = Arc::new(ProviderGateway::from_config(&config.payment));
        Self::new(config, store, orders, checkout)
    }
}

impl<S, G, C> Portal<S, G, C>
where
    S: ICatalogStore + ICatalogWriter,
    G: IOrderGateway,
    C: ICheckout,
{
    pub fn new(
        config: GranthConfig,
        store: Arc<S>,
        orders: Arc<G>,
        checkout: Arc<C>,
    ) -> GranthResult<Self> {
        config.validate()?;
        let catalog = Arc::new(CatalogEngine::new(store, &config.catalog));
        let gate = AccessGate::new(
            orders,
            checkout,
            config.access.clone(),
            config.payment.clone(),
        );
        info!(
            fan_out_limit = config.catalog.fan_out_limit,
            interstitial_secs = config.access.interstitial_secs,
            payments_configured = config.payment.has_credentials(),
            "portal ready"
        );
        Ok(Self {
            authoring: CatalogAuthoring::new(Arc::clone(&catalog)),
            catalog,
            sessions: SessionManager::new(),
            gate,
            config,
        })
    }

    pub fn config(&self) -> &GranthConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogEngine<S> {
        &self.catalog
    }

    // ── Sessions ────────────────────────────────────────────────────────

    pub fn handle_auth(&self, event: AuthEvent) -> Option<Arc<SessionContext>> {
        self.sessions.handle(event)
    }

    pub fn session(&self) -> Option<Arc<SessionContext>> {
        self.sessions.current()
    }

    // ── Catalog ─────────────────────────────────────────────────────────

    pub async fn get_tree(&self, scope: &Scope) -> TreeStatus {
        self.catalog.get_tree(scope).await
    }

    pub async fn tree_status(&self, scope: &Scope) -> TreeStatus {
        self.catalog.status(scope).await
    }

    pub fn open_view(&self, scope: &Scope) -> ViewTicket {
        self.catalog.open_view(scope)
    }

    pub fn abandon_view(&self, ticket: &ViewTicket) {
        self.catalog.abandon_view(ticket);
    }

    pub async fn load_view(&self, ticket: &ViewTicket) -> Option<TreeStatus> {
        self.catalog.load_view(ticket).await
    }

    pub async fn search(&self, scope: &Scope, query: &str) -> GranthResult<CatalogTree> {
        Ok(self.catalog.search(scope, query).await?)
    }

    pub async fn refresh(&self, scope: &Scope) {
        self.catalog.refresh(scope).await;
    }

    pub async fn list_combos(&self) -> GranthResult<Vec<Combo>> {
        Ok(self.catalog.list_combos().await?)
    }

    pub async fn search_combos(&self, query: &str) -> GranthResult<Vec<Combo>> {
        let combos = self.catalog.list_combos().await?;
        Ok(search_combos(&combos, query))
    }

    pub async fn get_combo(&self, combo_id: &str) -> GranthResult<Combo> {
        Ok(self.catalog.get_combo(combo_id).await?)
    }

    pub async fn resolve_combo(&self, combo: &Combo) -> GranthResult<Vec<PdfDocument>> {
        Ok(self.catalog.resolve_combo(combo).await?)
    }

    // ── Access ──────────────────────────────────────────────────────────

    pub fn get_access_state(&self, item: &GatedItem) -> GranthResult<AccessState> {
        let session = self.sessions.require()?;
        Ok(self.gate.access_state(item, &session))
    }

    pub fn decide(&self, item: &GatedItem) -> GranthResult<GateDecision> {
        let session = self.sessions.require()?;
        Ok(self.gate.decide(item, &session))
    }

    /// Unlock `item` for the signed-in user.
    pub async fn request_unlock(
        &self,
        item: &GatedItem,
        cancel: CancelSignal,
    ) -> GranthResult<UnlockOutcome> {
        let session = self.sessions.require()?;
        Ok(self.gate.request_unlock(item, &session, cancel).await)
    }

    // ── Authoring ───────────────────────────────────────────────────────

    pub async fn add_paper(&self, draft: NewPaper) -> GranthResult<Paper> {
        let session = self.sessions.require()?;
        self.authoring.add_paper(&session, draft).await
    }

    pub async fn add_tab(&self, draft: NewTab) -> GranthResult<Tab> {
        let session = self.sessions.require()?;
        self.authoring.add_tab(&session, draft).await
    }

    pub async fn add_sub_folder(
        &self,
        draft: NewSubFolder,
    ) -> GranthResult<SubFolder> {
        let session = self.sessions.require()?;
        self.authoring.add_sub_folder(&session, draft).await
    }

    pub async fn add_pdf(&self, draft: NewPdf) -> GranthResult<PdfDocument> {
        let session = self.sessions.require()?;
        self.authoring.add_pdf(&session, draft).await
    }

    pub async fn add_combo(&self, draft: NewCombo) -> GranthResult<Combo> {
        let session = self.sessions.require()?;
        self.authoring.add_combo(&session, draft).await
    }
}
