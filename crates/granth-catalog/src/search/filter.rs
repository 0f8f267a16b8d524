//! Tree pruning by search term.
//!
//! A node survives when it matches or when something below it survives. A
//! node that matches directly keeps its whole subtree, so searching for a
//! folder name shows everything in that folder.

use granth_core::models::{CatalogTree, Combo, PaperNode, PdfDocument, SubFolderNode, TabNode};

use super::SearchQuery;

/// Prune `tree` down to the branches relevant to `query`. Pure; the input
/// tree is never modified.
pub fn search_tree(tree: &CatalogTree, query: &str) -> CatalogTree {
    let query = SearchQuery::new(query);
    if query.is_empty() {
        return tree.clone();
    }
    CatalogTree {
        scope: tree.scope.clone(),
        papers: tree
            .papers
            .iter()
            .filter_map(|paper| prune_paper(paper, &query))
            .collect(),
        degraded: tree.degraded.clone(),
    }
}

/// Combos whose name or description match, in list order.
pub fn search_combos(combos: &[Combo], query: &str) -> Vec<Combo> {
    let query = SearchQuery::new(query);
    combos
        .iter()
        .filter(|combo| query.matches_any(&combo.name, &combo.description))
        .cloned()
        .collect()
}

fn prune_paper(node: &PaperNode, query: &SearchQuery) -> Option<PaperNode> {
    if query.matches(&node.paper.name) {
        return Some(node.clone());
    }
    let tabs: Vec<TabNode> = node
        .tabs
        .iter()
        .filter_map(|tab| prune_tab(tab, query))
        .collect();
    (!tabs.is_empty()).then(|| PaperNode {
        paper: node.paper.clone(),
        tabs,
        partial: node.partial,
    })
}

fn prune_tab(node: &TabNode, query: &SearchQuery) -> Option<TabNode> {
    if query.matches(&node.tab.name) {
        return Some(node.clone());
    }
    let sub_folders: Vec<SubFolderNode> = node
        .sub_folders
        .iter()
        .filter_map(|folder| prune_sub_folder(folder, query))
        .collect();
    (!sub_folders.is_empty()).then(|| TabNode {
        tab: node.tab.clone(),
        sub_folders,
        partial: node.partial,
    })
}

fn prune_sub_folder(node: &SubFolderNode, query: &SearchQuery) -> Option<SubFolderNode> {
    if query.matches(&node.sub_folder.name) {
        return Some(node.clone());
    }
    let pdfs: Vec<PdfDocument> = node
        .pdfs
        .iter()
        .filter(|pdf| query.matches_any(&pdf.name, &pdf.description))
        .cloned()
        .collect();
    (!pdfs.is_empty()).then(|| SubFolderNode {
        sub_folder: node.sub_folder.clone(),
        pdfs,
        partial: node.partial,
    })
}
