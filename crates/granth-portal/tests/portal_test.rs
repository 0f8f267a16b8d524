//! End-to-end flows through the portal: sign-in, browsing, search, combos
//! and unlocking.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use granth_access::payment::GENERIC_PAYMENT_FAILURE;
use granth_access::{AccessState, AuthEvent, CancelSignal, GatedItem, UnlockOutcome, UnlockedAsset};
use granth_core::config::{GranthConfig, PaymentConfig};
use granth_core::errors::{GranthError, PaymentError};
use granth_core::models::Scope;
use granth_core::traits::{ICheckout, IOrderGateway};
use granth_portal::{NewPaper, Portal};
use test_fixtures::scenarios::{self, PAPER_7, PDF_NOTES_A, PDF_NOTES_B};
use test_fixtures::{InstrumentedStore, ScriptedCheckout, ScriptedOrderGateway};

type TestPortal = Portal<InstrumentedStore, ScriptedOrderGateway, ScriptedCheckout>;

struct Harness {
    portal: TestPortal,
    store: Arc<InstrumentedStore>,
    orders: Arc<ScriptedOrderGateway>,
}

fn config() -> GranthConfig {
    GranthConfig {
        payment: PaymentConfig {
            key_id: Some("rzp_test_public".to_string()),
            key_secret: Some("rzp_test_secret".to_string()),
            ..PaymentConfig::default()
        },
        ..GranthConfig::default()
    }
}

fn harness_with(orders: ScriptedOrderGateway, checkout: ScriptedCheckout) -> Harness {
    let store = Arc::new(InstrumentedStore::new(scenarios::syllabus()));
    let orders = Arc::new(orders);
    let portal = Portal::new(
        config(),
        Arc::clone(&store),
        Arc::clone(&orders),
        Arc::new(checkout),
    )
    .unwrap();
    Harness {
        portal,
        store,
        orders,
    }
}

fn harness(checkout: ScriptedCheckout) -> Harness {
    harness_with(ScriptedOrderGateway::succeeding(), checkout)
}

async fn pdf_item<G, C>(portal: &Portal<InstrumentedStore, G, C>, pdf_id: &str) -> GatedItem
where
    G: IOrderGateway,
    C: ICheckout,
{
    let status = portal.get_tree(&Scope::All).await;
    let pdf = status
        .tree()
        .unwrap()
        .pdfs()
        .find(|p| p.id == pdf_id)
        .cloned()
        .unwrap();
    GatedItem::from(pdf)
}

// ── Construction ────────────────────────────────────────────────────────

#[test]
fn invalid_config_is_rejected_at_startup() {
    let mut bad = config();
    bad.catalog.fan_out_limit = 0;

    let result = Portal::new(
        bad,
        Arc::new(InstrumentedStore::new(scenarios::paper_seven())),
        Arc::new(ScriptedOrderGateway::succeeding()),
        Arc::new(ScriptedCheckout::declining()),
    );

    assert!(matches!(result, Err(GranthError::Config(_))));
}

#[tokio::test(start_paused = true)]
async fn hosted_portal_without_credentials_still_serves_free_content() {
    let store = Arc::new(InstrumentedStore::new(scenarios::paper_seven()));
    let portal = Portal::hosted(
        GranthConfig::default(),
        store,
        Arc::new(ScriptedCheckout::paying("pay_never")),
    )
    .unwrap();
    portal.handle_auth(AuthEvent::SignedIn(scenarios::student()));

    let free = portal
        .request_unlock(&pdf_item(&portal, PDF_NOTES_A).await, CancelSignal::never())
        .await
        .unwrap();
    assert!(free.is_unlocked());

    let paid = portal
        .request_unlock(&pdf_item(&portal, PDF_NOTES_B).await, CancelSignal::never())
        .await
        .unwrap();
    assert_eq!(paid, UnlockOutcome::Failed(GENERIC_PAYMENT_FAILURE.to_string()));
}

// ── Sessions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn access_checks_need_a_signed_in_user() {
    let h = harness(ScriptedCheckout::declining());
    let notes_a = pdf_item(&h.portal, PDF_NOTES_A).await;

    assert!(matches!(h.portal.get_access_state(&notes_a), Err(GranthError::NoSession)));
    assert!(matches!(h.portal.decide(&notes_a), Err(GranthError::NoSession)));
    assert!(matches!(
        h.portal.request_unlock(&notes_a, CancelSignal::never()).await,
        Err(GranthError::NoSession)
    ));
}

#[tokio::test]
async fn browsing_does_not_need_a_session() {
    let h = harness(ScriptedCheckout::declining());

    let status = h.portal.get_tree(&Scope::All).await;

    assert!(status.is_ready());
    assert_eq!(status.tree().unwrap().papers.len(), 2);
    assert_eq!(h.portal.list_combos().await.unwrap().len(), 2);
}

// ── Browsing and search ─────────────────────────────────────────────────

#[tokio::test]
async fn search_filters_the_cached_tree() {
    let h = harness(ScriptedCheckout::declining());
    let _ = h.portal.get_tree(&Scope::All).await;
    let reads = h.store.total_reads();

    let found = h.portal.search(&Scope::All, "  MAURYAN ").await.unwrap();

    let ids: Vec<_> = found.pdfs().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![PDF_NOTES_B]);
    assert_eq!(h.store.total_reads(), reads, "search reuses the cached tree");
}

#[tokio::test]
async fn combos_are_searched_and_resolved() {
    let h = harness(ScriptedCheckout::declining());

    let all: Vec<_> = h
        .portal
        .search_combos("")
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(all, vec!["combo-geo", "combo-history"]);

    let geo = h.portal.search_combos("geography").await.unwrap();
    assert_eq!(geo.len(), 1);

    let members: Vec<_> = h
        .portal
        .resolve_combo(&geo[0])
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(members, vec!["pdf-monsoon", "pdf-ganga"]);
}

// ── Unlocking ───────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn free_pdf_unlocks_after_the_interstitial() {
    let h = harness(ScriptedCheckout::declining());
    h.portal.handle_auth(AuthEvent::SignedIn(scenarios::student()));
    let notes_a = pdf_item(&h.portal, PDF_NOTES_A).await;
    let started = Instant::now();

    let outcome = h
        .portal
        .request_unlock(&notes_a, CancelSignal::never())
        .await
        .unwrap();

    assert_eq!(started.elapsed(), Duration::from_secs(5));
    assert!(matches!(
        outcome,
        UnlockOutcome::Unlocked(UnlockedAsset::Pdf { ref pdf_id, .. }) if pdf_id == PDF_NOTES_A
    ));
}

#[tokio::test]
async fn paid_unlock_lasts_for_the_session_only() {
    let h = harness(ScriptedCheckout::paying("pay_42"));
    h.portal.handle_auth(AuthEvent::SignedIn(scenarios::student()));
    let notes_b = pdf_item(&h.portal, PDF_NOTES_B).await;

    let outcome = h
        .portal
        .request_unlock(&notes_b, CancelSignal::never())
        .await
        .unwrap();

    assert!(outcome.is_unlocked());
    assert_eq!(h.portal.get_access_state(&notes_b).unwrap(), AccessState::Unlocked);

    h.portal.handle_auth(AuthEvent::SignedOut);
    h.portal.handle_auth(AuthEvent::SignedIn(scenarios::student()));
    assert_eq!(h.portal.get_access_state(&notes_b).unwrap(), AccessState::Locked);
}

#[tokio::test]
async fn failed_payment_leaves_the_catalog_untouched() {
    let h = harness_with(
        ScriptedOrderGateway::failing(PaymentError::OrderCreation {
            reason: "provider returned 500".to_string(),
        }),
        ScriptedCheckout::paying("pay_unused"),
    );
    h.portal.handle_auth(AuthEvent::SignedIn(scenarios::student()));
    let notes_b = pdf_item(&h.portal, PDF_NOTES_B).await;
    let reads = h.store.total_reads();

    let outcome = h
        .portal
        .request_unlock(&notes_b, CancelSignal::never())
        .await
        .unwrap();

    assert_eq!(outcome, UnlockOutcome::Failed(GENERIC_PAYMENT_FAILURE.to_string()));
    assert_eq!(h.portal.get_access_state(&notes_b).unwrap(), AccessState::Locked);
    assert_eq!(h.store.total_reads(), reads);
    assert!(h.portal.tree_status(&Scope::All).await.is_ready());
    assert_eq!(h.orders.requests().await.len(), 1);
}

#[tokio::test]
async fn paid_combo_unlock_hands_over_its_members() {
    let h = harness(ScriptedCheckout::paying("pay_combo"));
    h.portal.handle_auth(AuthEvent::SignedIn(scenarios::student()));
    let combo = h.portal.get_combo("combo-history").await.unwrap();

    let outcome = h
        .portal
        .request_unlock(&GatedItem::from(combo.clone()), CancelSignal::never())
        .await
        .unwrap();

    match outcome {
        UnlockOutcome::Unlocked(UnlockedAsset::Combo { combo_id, member_pdf_ids }) => {
            assert_eq!(combo_id, "combo-history");
            assert_eq!(member_pdf_ids, vec![PDF_NOTES_B, "pdf-delhi", PDF_NOTES_A]);
        }
        other => panic!("expected unlocked combo, got {other:?}"),
    }
    let resolved: Vec<_> = h
        .portal
        .resolve_combo(&combo)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(resolved, vec![PDF_NOTES_B, "pdf-delhi", PDF_NOTES_A]);
}

// ── Authoring ───────────────────────────────────────────────────────────

#[tokio::test]
async fn authoring_uses_the_signed_in_user() {
    let h = harness(ScriptedCheckout::declining());
    let draft = NewPaper {
        name: "Paper 9".to_string(),
        description: "Ethics".to_string(),
    };

    assert!(matches!(h.portal.add_paper(draft.clone()).await, Err(GranthError::NoSession)));

    h.portal.handle_auth(AuthEvent::SignedIn(scenarios::student()));
    assert!(matches!(
        h.portal.add_paper(draft.clone()).await,
        Err(GranthError::Unauthorized { .. })
    ));

    h.portal.handle_auth(AuthEvent::SignedIn(scenarios::admin()));
    let paper = h.portal.add_paper(draft).await.unwrap();
    let tree = h.portal.get_tree(&Scope::All).await;
    assert!(tree.tree().unwrap().paper(&paper.id).is_some());
}
