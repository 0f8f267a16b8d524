//! The materialized Paper → Tab → SubFolder → PdfDocument tree.

use serde::{Deserialize, Serialize};

use super::{ChildKind, Paper, PdfDocument, Scope, SubFolder, Tab};

/// A fully materialized content tree for one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTree {
    pub scope: Scope,
    /// Papers in store order (paper number, ties by id).
    pub papers: Vec<PaperNode>,
    /// Branches whose children could not be fetched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<DegradedBranch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperNode {
    pub paper: Paper,
    pub tabs: Vec<TabNode>,
    /// Tab fetch failed; `tabs` is empty rather than complete.
    #[serde(default)]
    pub partial: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabNode {
    pub tab: Tab,
    pub sub_folders: Vec<SubFolderNode>,
    #[serde(default)]
    pub partial: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubFolderNode {
    pub sub_folder: SubFolder,
    pub pdfs: Vec<PdfDocument>,
    #[serde(default)]
    pub partial: bool,
}

/// A parent whose child list is missing because the read failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradedBranch {
    /// Kind of the children that could not be read.
    pub child_kind: ChildKind,
    pub parent_id: String,
    pub reason: String,
}

impl CatalogTree {
    pub fn empty(scope: Scope) -> Self {
        Self {
            scope,
            papers: Vec::new(),
            degraded: Vec::new(),
        }
    }

    /// No papers at all. Distinct from "not loaded", which has no tree.
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        !self.degraded.is_empty()
    }

    pub fn paper(&self, paper_id: &str) -> Option<&PaperNode> {
        self.papers.iter().find(|p| p.paper.id == paper_id)
    }

    /// Every PDF in tree order.
    pub fn pdfs(&self) -> impl Iterator<Item = &PdfDocument> {
        self.papers
            .iter()
            .flat_map(|p| p.tabs.iter())
            .flat_map(|t| t.sub_folders.iter())
            .flat_map(|s| s.pdfs.iter())
    }

    pub fn pdf_count(&self) -> usize {
        self.pdfs().count()
    }
}

impl PaperNode {
    pub fn new(paper: Paper) -> Self {
        Self {
            paper,
            tabs: Vec::new(),
            partial: false,
        }
    }
}

impl TabNode {
    pub fn new(tab: Tab) -> Self {
        Self {
            tab,
            sub_folders: Vec::new(),
            partial: false,
        }
    }
}

impl SubFolderNode {
    pub fn new(sub_folder: SubFolder) -> Self {
        Self {
            sub_folder,
            pdfs: Vec::new(),
            partial: false,
        }
    }
}
