//! Property-based tests for the search filter and combo resolution.
//!
//! - An empty query returns the tree unchanged.
//! - Every surviving leaf matches, or sits under a node that matches.
//! - Filtering only removes; nothing is invented or reordered.
//! - Combo members resolve in combo order with unknown ids omitted.

use chrono::Utc;
use proptest::prelude::*;

use granth_catalog::combo::resolve;
use granth_catalog::{search_tree, SearchQuery, TreeIndex};
use granth_core::models::{
    Access, CatalogTree, Combo, Paper, PaperNode, PdfDocument, Scope, SubFolder, SubFolderNode,
    Tab, TabNode,
};

// ── Strategy helpers ────────────────────────────────────────────────────

const WORDS: &[&str] = &["Ancient", "Medieval", "Notes", "Polity", "River", "Climate", "Map"];

fn label() -> impl Strategy<Value = String> {
    (prop::sample::select(WORDS), 0u8..4).prop_map(|(word, n)| format!("{word} {n}"))
}

fn pdf_strategy() -> impl Strategy<Value = (String, String)> {
    (label(), label())
}

fn folder_strategy() -> impl Strategy<Value = (String, Vec<(String, String)>)> {
    (label(), prop::collection::vec(pdf_strategy(), 0..4))
}

fn tab_strategy() -> impl Strategy<Value = (String, Vec<(String, Vec<(String, String)>)>)> {
    (label(), prop::collection::vec(folder_strategy(), 0..3))
}

fn tree_strategy() -> impl Strategy<Value = CatalogTree> {
    prop::collection::vec((label(), prop::collection::vec(tab_strategy(), 0..3)), 0..4)
        .prop_map(build_tree)
}

type RawTab = (String, Vec<(String, Vec<(String, String)>)>);

fn build_tree(raw: Vec<(String, Vec<RawTab>)>) -> CatalogTree {
    let now = Utc::now();
    let mut tree = CatalogTree::empty(Scope::All);
    for (p, (paper_name, tabs)) in raw.into_iter().enumerate() {
        let paper_id = format!("p{p}");
        let mut paper = PaperNode::new(Paper {
            id: paper_id.clone(),
            name: paper_name,
            description: String::new(),
            paper_number: p as u32 + 1,
            created_at: now,
        });
        for (t, (tab_name, folders)) in tabs.into_iter().enumerate() {
            let tab_id = format!("{paper_id}-t{t}");
            let mut tab = TabNode::new(Tab {
                id: tab_id.clone(),
                name: tab_name,
                paper_id: paper_id.clone(),
                created_at: now,
            });
            for (s, (folder_name, pdfs)) in folders.into_iter().enumerate() {
                let folder_id = format!("{tab_id}-s{s}");
                let mut folder = SubFolderNode::new(SubFolder {
                    id: folder_id.clone(),
                    name: folder_name,
                    paper_id: paper_id.clone(),
                    tab_id: tab_id.clone(),
                    created_at: now,
                });
                for (d, (name, description)) in pdfs.into_iter().enumerate() {
                    folder.pdfs.push(PdfDocument {
                        id: format!("{folder_id}-d{d}"),
                        name,
                        description,
                        asset_link: "https://example.com/a.pdf".to_string(),
                        access: Access::Free,
                        paper_id: paper_id.clone(),
                        tab_id: tab_id.clone(),
                        sub_folder_id: folder_id.clone(),
                        created_at: now,
                    });
                }
                tab.sub_folders.push(folder);
            }
            paper.tabs.push(tab);
        }
        tree.papers.push(paper);
    }
    tree
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(WORDS).prop_map(|w| w.to_lowercase()),
        label().prop_map(|l| l.to_uppercase()),
        "[a-z ]{0,4}",
    ]
}

// ── Search: empty query is identity ─────────────────────────────────────
proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn blank_query_returns_tree_unchanged(tree in tree_strategy(), blanks in " {0,3}") {
        prop_assert_eq!(search_tree(&tree, &blanks), tree);
    }
}

// ── Search: whole-branch rule ───────────────────────────────────────────
proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_surviving_leaf_is_justified(tree in tree_strategy(), raw in query_strategy()) {
        let query = SearchQuery::new(&raw);
        prop_assume!(!query.is_empty());
        let result = search_tree(&tree, &raw);

        for paper in &result.papers {
            let paper_hit = query.matches(&paper.paper.name);
            for tab in &paper.tabs {
                let tab_hit = paper_hit || query.matches(&tab.tab.name);
                for folder in &tab.sub_folders {
                    let folder_hit = tab_hit || query.matches(&folder.sub_folder.name);
                    for pdf in &folder.pdfs {
                        prop_assert!(
                            folder_hit || query.matches_any(&pdf.name, &pdf.description),
                            "leaf {} survived without a match", pdf.id
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn filtering_only_removes(tree in tree_strategy(), raw in query_strategy()) {
        let result = search_tree(&tree, &raw);

        let original: Vec<&str> = tree.pdfs().map(|p| p.id.as_str()).collect();
        let kept: Vec<&str> = result.pdfs().map(|p| p.id.as_str()).collect();

        // `kept` is a subsequence of `original`.
        let mut remaining = original.iter();
        for id in &kept {
            prop_assert!(remaining.any(|o| o == id), "{} reordered or invented", id);
        }
    }

    #[test]
    fn every_matching_leaf_survives(tree in tree_strategy(), raw in query_strategy()) {
        let query = SearchQuery::new(&raw);
        let result = search_tree(&tree, &raw);
        let kept: Vec<&str> = result.pdfs().map(|p| p.id.as_str()).collect();

        for pdf in tree.pdfs() {
            if query.matches_any(&pdf.name, &pdf.description) {
                prop_assert!(kept.contains(&pdf.id.as_str()), "matching leaf {} dropped", pdf.id);
            }
        }
    }
}

// ── Combo resolution order ──────────────────────────────────────────────
proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn combo_members_resolve_in_combo_order(
        tree in tree_strategy(),
        picks in prop::collection::vec(0usize..40, 0..12),
    ) {
        let index = TreeIndex::from_tree(&tree);
        let known: Vec<String> = tree.pdfs().map(|p| p.id.clone()).collect();
        // Out-of-range picks become ids the index has never seen.
        let members: Vec<String> = picks
            .iter()
            .map(|&i| known.get(i).cloned().unwrap_or_else(|| format!("missing-{i}")))
            .collect();
        let combo = Combo::new("c", "Combo", "", Access::Free, members.clone(), Utc::now());

        let resolved: Vec<String> = resolve(&combo, &index).into_iter().map(|p| p.id).collect();

        let mut expected: Vec<String> = Vec::new();
        for id in members {
            if index.contains(&id) && !expected.contains(&id) {
                expected.push(id);
            }
        }
        prop_assert_eq!(resolved, expected);
    }
}
