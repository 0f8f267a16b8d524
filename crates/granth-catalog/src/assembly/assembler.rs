//! Level-by-level tree materialization.
//!
//! Papers first, then every paper's tabs, then every tab's sub-folders, then
//! every sub-folder's PDFs. Each level is one bounded fan-out; store order is
//! kept as returned. A failed child read empties and flags that one parent
//! and the walk carries on.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use granth_core::config::CatalogConfig;
use granth_core::errors::StoreError;
use granth_core::models::{
    CatalogEntity, CatalogTree, ChildKind, DegradedBranch, EntityKind, Paper, PaperNode,
    PdfDocument, Scope, SubFolder, SubFolderNode, Tab, TabNode,
};
use granth_core::traits::ICatalogStore;

use super::fan_out::{with_timeout, FanOut};
use super::TreeIndex;

/// A tree plus the PDF index built alongside it.
#[derive(Debug, Clone)]
pub struct MaterializedTree {
    pub tree: CatalogTree,
    pub index: TreeIndex,
    /// Refresh epoch of the scope when assembly started.
    pub(crate) epoch: u64,
}

pub struct TreeAssembler<S> {
    store: Arc<S>,
    fan_out: FanOut<S>,
    read_timeout: Duration,
}

impl<S: ICatalogStore> TreeAssembler<S> {
    pub fn new(store: Arc<S>, config: &CatalogConfig) -> Self {
        Self {
            fan_out: FanOut::new(Arc::clone(&store), config.fan_out_limit, config.read_timeout()),
            store,
            read_timeout: config.read_timeout(),
        }
    }

    /// Materialize `scope`. Only a failed root read is an error.
    pub async fn assemble(&self, scope: &Scope) -> Result<MaterializedTree, StoreError> {
        let started = Instant::now();
        let papers = self.roots(scope).await?;
        if papers.is_empty() {
            return Ok(MaterializedTree {
                tree: CatalogTree::empty(scope.clone()),
                index: TreeIndex::new(),
                epoch: 0,
            });
        }
        let mut degraded = Vec::new();
        let mut index = TreeIndex::new();

        let mut paper_nodes: Vec<PaperNode> = papers.into_iter().map(PaperNode::new).collect();

        // Tabs
        let paper_ids: Vec<String> = paper_nodes.iter().map(|p| p.paper.id.clone()).collect();
        let tab_reads = self.fan_out.children(ChildKind::Tab, &paper_ids).await;
        for (node, read) in paper_nodes.iter_mut().zip(tab_reads) {
            match read {
                Ok(children) => {
                    node.tabs = children
                        .into_iter()
                        .filter_map(|child| accept_tab(child, &node.paper))
                        .map(TabNode::new)
                        .collect();
                }
                Err(e) => {
                    node.partial = true;
                    degraded.push(degrade(ChildKind::Tab, &node.paper.id, &e));
                }
            }
        }

        // Sub-folders
        let tab_ids: Vec<String> = paper_nodes
            .iter()
            .flat_map(|p| p.tabs.iter().map(|t| t.tab.id.clone()))
            .collect();
        let folder_reads = self.fan_out.children(ChildKind::SubFolder, &tab_ids).await;
        let tab_nodes = paper_nodes.iter_mut().flat_map(|p| p.tabs.iter_mut());
        for (node, read) in tab_nodes.zip(folder_reads) {
            match read {
                Ok(children) => {
                    node.sub_folders = children
                        .into_iter()
                        .filter_map(|child| accept_sub_folder(child, &node.tab))
                        .map(SubFolderNode::new)
                        .collect();
                }
                Err(e) => {
                    node.partial = true;
                    degraded.push(degrade(ChildKind::SubFolder, &node.tab.id, &e));
                }
            }
        }

        // PDFs, indexed as they attach
        let folder_ids: Vec<String> = paper_nodes
            .iter()
            .flat_map(|p| p.tabs.iter())
            .flat_map(|t| t.sub_folders.iter().map(|s| s.sub_folder.id.clone()))
            .collect();
        let pdf_reads = self.fan_out.children(ChildKind::Pdf, &folder_ids).await;
        let folder_nodes = paper_nodes
            .iter_mut()
            .flat_map(|p| p.tabs.iter_mut())
            .flat_map(|t| t.sub_folders.iter_mut());
        for (node, read) in folder_nodes.zip(pdf_reads) {
            match read {
                Ok(children) => {
                    node.pdfs = children
                        .into_iter()
                        .filter_map(|child| accept_pdf(child, &node.sub_folder))
                        .inspect(|pdf| index.insert(pdf))
                        .collect();
                }
                Err(e) => {
                    node.partial = true;
                    degraded.push(degrade(ChildKind::Pdf, &node.sub_folder.id, &e));
                }
            }
        }

        let tree = CatalogTree {
            scope: scope.clone(),
            papers: paper_nodes,
            degraded,
        };
        info!(
            scope = %scope,
            papers = tree.papers.len(),
            tabs = tab_ids.len(),
            sub_folders = folder_ids.len(),
            pdfs = index.len(),
            degraded = tree.degraded.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "catalog tree assembled"
        );
        Ok(MaterializedTree {
            tree,
            index,
            epoch: 0,
        })
    }

    async fn roots(&self, scope: &Scope) -> Result<Vec<Paper>, StoreError> {
        match scope {
            Scope::All => with_timeout(self.read_timeout, self.store.list_papers()).await,
            Scope::Paper(id) => {
                let read = self.store.get_by_id(EntityKind::Paper, id);
                match with_timeout(self.read_timeout, read).await {
                    Ok(entity) => Ok(entity.into_paper().into_iter().collect()),
                    Err(StoreError::NotFound { .. }) => {
                        debug!(paper_id = %id, "scoped paper not found; empty tree");
                        Ok(Vec::new())
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }
}

fn degrade(child_kind: ChildKind, parent_id: &str, error: &StoreError) -> DegradedBranch {
    warn!(
        child_kind = %child_kind,
        parent_id = %parent_id,
        error = %error,
        "child read failed; branch left partial"
    );
    DegradedBranch {
        child_kind,
        parent_id: parent_id.to_string(),
        reason: error.to_string(),
    }
}

fn accept_tab(child: CatalogEntity, paper: &Paper) -> Option<Tab> {
    let id = child.id().to_string();
    match child.into_tab() {
        Some(tab) if tab.paper_id == paper.id => Some(tab),
        Some(_) => {
            warn!(tab_id = %id, paper_id = %paper.id, "tab back-reference mismatch; dropped");
            None
        }
        None => {
            warn!(record_id = %id, "non-tab record under paper; dropped");
            None
        }
    }
}

fn accept_sub_folder(child: CatalogEntity, tab: &Tab) -> Option<SubFolder> {
    let id = child.id().to_string();
    match child.into_sub_folder() {
        Some(folder) if folder.is_consistent_with(tab) => Some(folder),
        Some(_) => {
            warn!(sub_folder_id = %id, tab_id = %tab.id, "sub-folder ancestry mismatch; dropped");
            None
        }
        None => {
            warn!(record_id = %id, "non-folder record under tab; dropped");
            None
        }
    }
}

fn accept_pdf(child: CatalogEntity, folder: &SubFolder) -> Option<PdfDocument> {
    let id = child.id().to_string();
    match child.into_pdf() {
        Some(pdf) if pdf.is_consistent_with(folder) => Some(pdf),
        Some(_) => {
            warn!(pdf_id = %id, sub_folder_id = %folder.id, "pdf ancestry mismatch; dropped");
            None
        }
        None => {
            warn!(record_id = %id, "non-pdf record under sub-folder; dropped");
            None
        }
    }
}
