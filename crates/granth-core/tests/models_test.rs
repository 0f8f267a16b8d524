//! Wire format and invariants of the catalog entities.

use chrono::{TimeZone, Utc};
use granth_core::errors::{GranthError, PaymentError, RecoveryAction, StoreError};
use granth_core::models::*;

fn ts() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
}

// ── Access / price ────────────────────────────────────────────────────────

#[test]
fn paid_pdf_decodes_with_price() {
    let json = r#"{
        "id": "pdf-1", "name": "Notes B", "description": "paid notes",
        "assetLink": "https://drive.example/b", "accessType": "Paid", "price": 99,
        "paperId": "p7", "tabId": "t1", "subFolderId": "s1",
        "createdAt": "2024-05-01T10:00:00Z"
    }"#;
    let pdf: PdfDocument = serde_json::from_str(json).unwrap();
    assert_eq!(pdf.access.access_type(), AccessType::Paid);
    assert_eq!(pdf.access.price().map(|p| p.amount()), Some(99));
}

#[test]
fn paid_without_price_is_rejected() {
    let json = r#"{
        "id": "pdf-1", "name": "n", "description": "d", "assetLink": "https://x",
        "accessType": "Paid",
        "paperId": "p", "tabId": "t", "subFolderId": "s",
        "createdAt": "2024-05-01T10:00:00Z"
    }"#;
    assert!(serde_json::from_str::<PdfDocument>(json).is_err());
}

#[test]
fn paid_with_zero_price_is_rejected() {
    let json = r#"{
        "id": "pdf-1", "name": "n", "description": "d", "assetLink": "https://x",
        "accessType": "Paid", "price": 0,
        "paperId": "p", "tabId": "t", "subFolderId": "s",
        "createdAt": "2024-05-01T10:00:00Z"
    }"#;
    assert!(serde_json::from_str::<PdfDocument>(json).is_err());
}

#[test]
fn free_access_serializes_without_price() {
    let value = serde_json::to_value(Access::Free).unwrap();
    assert_eq!(value, serde_json::json!({ "accessType": "Free" }));

    let paid = Access::paid(Price::rupees(49).unwrap());
    let value = serde_json::to_value(paid).unwrap();
    assert_eq!(value, serde_json::json!({ "accessType": "Paid", "price": 49 }));
}

#[test]
fn price_minor_units_are_paise() {
    let price = Price::rupees(99).unwrap();
    assert_eq!(price.minor_units(), 9_900);
    assert_eq!(price.to_string(), "₹99");
    assert!(Price::rupees(0).is_none());
}

// ── Combo ─────────────────────────────────────────────────────────────────

#[test]
fn combo_member_ids_are_deduplicated_in_order() {
    let combo = Combo::new(
        "c1",
        "Bundle",
        "all notes",
        Access::Free,
        ["a", "b", "a", "c", "b"].map(String::from),
        ts(),
    );
    assert_eq!(combo.member_pdf_ids, vec!["a", "b", "c"]);
}

#[test]
fn combo_decoding_collapses_duplicates() {
    let json = r#"{
        "id": "c1", "name": "Bundle", "description": "d",
        "accessType": "Paid", "price": 199,
        "pdfIds": ["x", "y", "x"],
        "createdAt": "2024-05-01T10:00:00Z"
    }"#;
    let combo: Combo = serde_json::from_str(json).unwrap();
    assert_eq!(combo.member_pdf_ids, vec!["x", "y"]);
    assert_eq!(combo.image_url, None);
    assert_eq!(combo.access.price().map(|p| p.amount()), Some(199));
}

// ── Ancestry ──────────────────────────────────────────────────────────────

#[test]
fn ancestry_consistency_checks() {
    let tab = Tab {
        id: "t1".into(),
        name: "History".into(),
        paper_id: "p7".into(),
        created_at: ts(),
    };
    let folder = SubFolder {
        id: "s1".into(),
        name: "Ancient".into(),
        paper_id: "p7".into(),
        tab_id: "t1".into(),
        created_at: ts(),
    };
    assert!(folder.is_consistent_with(&tab));

    let mut pdf = PdfDocument {
        id: "d1".into(),
        name: "Notes A".into(),
        description: "free".into(),
        asset_link: "https://drive.example/a".into(),
        access: Access::Free,
        paper_id: "p7".into(),
        tab_id: "t1".into(),
        sub_folder_id: "s1".into(),
        created_at: ts(),
    };
    assert!(pdf.is_consistent_with(&folder));

    pdf.paper_id = "p8".into();
    assert!(!pdf.is_consistent_with(&folder), "paper id must match the folder's");
}

// ── Scope / entity ────────────────────────────────────────────────────────

#[test]
fn scope_coverage() {
    assert!(Scope::All.covers_paper("p1"));
    assert!(Scope::paper("p1").covers_paper("p1"));
    assert!(!Scope::paper("p1").covers_paper("p2"));
    assert_eq!(Scope::paper("p1").to_string(), "paper:p1");
}

#[test]
fn child_kind_parents() {
    assert_eq!(ChildKind::Tab.parent_kind(), EntityKind::Paper);
    assert_eq!(ChildKind::SubFolder.parent_kind(), EntityKind::Tab);
    assert_eq!(ChildKind::Pdf.parent_kind(), EntityKind::SubFolder);
    assert_eq!(ChildKind::Pdf.to_string(), "pdf");
}

#[test]
fn user_role_wire_format() {
    let user: User = serde_json::from_str(
        r#"{"id":"1","fullName":"एडमिन बॉस","email":"admin@example.com","role":"admin"}"#,
    )
    .unwrap();
    assert!(user.is_admin());
    assert_eq!(user.mobile_number, None);
}

// ── Errors ────────────────────────────────────────────────────────────────

#[test]
fn recovery_actions_follow_error_taxonomy() {
    let unavailable: GranthError = StoreError::unavailable("connection reset").into();
    assert_eq!(RecoveryAction::for_error(&unavailable), RecoveryAction::Retry);

    let missing: GranthError = StoreError::not_found(EntityKind::Pdf, "x").into();
    assert_eq!(RecoveryAction::for_error(&missing), RecoveryAction::Fallback);

    let failed: GranthError = PaymentError::Failed { reason: "card declined".into() }.into();
    assert_eq!(RecoveryAction::for_error(&failed), RecoveryAction::Escalate);

    let cancelled: GranthError = PaymentError::Cancelled.into();
    assert_eq!(RecoveryAction::for_error(&cancelled), RecoveryAction::Ignore);

    let config: GranthError = PaymentError::Configuration { missing: "key_secret".into() }.into();
    assert_eq!(RecoveryAction::for_error(&config), RecoveryAction::Escalate);
}

#[test]
fn store_error_retryability() {
    assert!(StoreError::Timeout { millis: 10 }.is_retryable());
    assert!(StoreError::unavailable("down").is_retryable());
    assert!(!StoreError::not_found(EntityKind::Paper, "p").is_retryable());
    assert_eq!(
        StoreError::not_found(EntityKind::SubFolder, "s9").to_string(),
        "sub-folder not found: s9"
    );
}
