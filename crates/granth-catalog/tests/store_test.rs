//! In-memory store: ordering rules, lookups, writes and snapshots.

use granth_catalog::{CatalogSnapshot, InMemoryCatalogStore};
use granth_core::errors::StoreError;
use granth_core::models::{Access, CatalogEntity, ChildKind, EntityKind};
use granth_core::traits::{ICatalogStore, ICatalogWriter};
use test_fixtures::scenarios::{self, FOLDER_ANCIENT, PAPER_7, TAB_HISTORY};

#[tokio::test]
async fn papers_order_by_number_then_id() {
    let mut snapshot = scenarios::syllabus();
    snapshot.papers.push(scenarios::paper("paper-2b", "Paper 2 (Hindi)", 2));
    let store = InMemoryCatalogStore::from_snapshot(snapshot);

    let ids: Vec<String> = store.list_papers().await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, ["paper-2", "paper-2b", PAPER_7]);
}

#[tokio::test]
async fn children_follow_kind_specific_order() {
    let store = InMemoryCatalogStore::from_snapshot(scenarios::syllabus());

    let folders = store.list_children(ChildKind::SubFolder, TAB_HISTORY).await.unwrap();
    let folder_ids: Vec<&str> = folders.iter().map(CatalogEntity::id).collect();
    assert_eq!(folder_ids, [FOLDER_ANCIENT, "folder-medieval"]);

    let pdfs = store.list_children(ChildKind::Pdf, FOLDER_ANCIENT).await.unwrap();
    assert!(pdfs.iter().all(|e| e.kind() == EntityKind::Pdf));
    let pdf_ids: Vec<&str> = pdfs.iter().map(CatalogEntity::id).collect();
    assert_eq!(pdf_ids, [scenarios::PDF_NOTES_A, scenarios::PDF_NOTES_B]);

    assert!(store.list_children(ChildKind::Tab, "paper-none").await.unwrap().is_empty());
}

#[tokio::test]
async fn get_by_id_reports_not_found() {
    let store = InMemoryCatalogStore::from_snapshot(scenarios::paper_seven());

    let found = store.get_by_id(EntityKind::Tab, TAB_HISTORY).await.unwrap();
    assert_eq!(found.into_tab().unwrap().name, "History");

    let missing = store.get_by_id(EntityKind::Pdf, "pdf-404").await.unwrap_err();
    assert_eq!(missing, StoreError::not_found(EntityKind::Pdf, "pdf-404"));
}

#[tokio::test]
async fn duplicate_ids_are_rejected_on_insert() {
    let store = InMemoryCatalogStore::from_snapshot(scenarios::paper_seven());

    let err = store
        .insert_paper(scenarios::paper(PAPER_7, "Again", 8))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidRecord { kind: EntityKind::Paper, .. }));
    assert_eq!(store.count_papers().await.unwrap(), 1);
}

#[tokio::test]
async fn inserted_records_become_visible() {
    let store = InMemoryCatalogStore::new();
    store.insert_paper(scenarios::paper("p1", "Paper 1", 1)).await.unwrap();
    let tab = scenarios::tab("t1", "Polity", "p1");
    store.insert_tab(tab.clone()).await.unwrap();
    let folder = scenarios::sub_folder("s1", "Constitution", &tab, 0);
    store.insert_sub_folder(folder.clone()).await.unwrap();
    store
        .insert_pdf(scenarios::pdf("d1", "Preamble", "Notes", Access::Free, &folder))
        .await
        .unwrap();
    store
        .insert_combo(scenarios::combo("c1", "Polity Pack", Access::Free, &["d1"], 0))
        .await
        .unwrap();

    assert_eq!(store.count_papers().await.unwrap(), 1);
    assert_eq!(store.list_children(ChildKind::Pdf, "s1").await.unwrap().len(), 1);
    assert_eq!(store.list_combos().await.unwrap()[0].member_pdf_ids, ["d1"]);
    assert_eq!(store.snapshot().unwrap().record_count(), 5);
}

#[test]
fn snapshot_loads_from_json() {
    let json = scenarios::syllabus().to_json().unwrap();
    let store = InMemoryCatalogStore::from_json(&json).unwrap();
    assert_eq!(store.snapshot().unwrap(), scenarios::syllabus());
}

#[test]
fn snapshot_with_missing_collections_defaults_to_empty() {
    let snapshot = CatalogSnapshot::from_json(r#"{ "papers": [] }"#).unwrap();
    assert_eq!(snapshot.record_count(), 0);
}
