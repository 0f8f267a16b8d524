//! Admin catalog authoring.
//!
//! Every operation checks the admin role, validates the draft, verifies
//! parent references against the store, writes, then refreshes the cached
//! trees the write can affect.

use std::sync::Arc;

use chrono::Utc;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::info;

use granth_catalog::CatalogEngine;
use granth_core::errors::{GranthError, GranthResult, StoreError};
use granth_core::models::{
    Access, CatalogEntity, Combo, EntityKind, Paper, PdfDocument, Scope, SubFolder, Tab,
};
use granth_core::traits::{ICatalogStore, ICatalogWriter};
use granth_access::SessionContext;

/// Longest paper description the console accepts, in characters.
pub const MAX_PAPER_DESCRIPTION_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaper {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTab {
    pub name: String,
    pub paper_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubFolder {
    pub name: String,
    pub paper_id: String,
    pub tab_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPdf {
    pub name: String,
    pub description: String,
    pub asset_link: String,
    #[serde(flatten)]
    pub access: Access,
    pub paper_id: String,
    pub tab_id: String,
    pub sub_folder_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCombo {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub access: Access,
    pub member_pdf_ids: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

pub struct CatalogAuthoring<S: ICatalogStore> {
    catalog: Arc<CatalogEngine<S>>,
}

impl<S: ICatalogStore + ICatalogWriter> CatalogAuthoring<S> {
    pub fn new(catalog: Arc<CatalogEngine<S>>) -> Self {
        Self { catalog }
    }

    /// Numbered after the papers that already exist.
    pub async fn add_paper(&self, session: &SessionContext, draft: NewPaper) -> GranthResult<Paper> {
        session.require_admin()?;
        let name = required("paper name", &draft.name)?;
        let description = required("paper description", &draft.description)?;
        if description.chars().count() > MAX_PAPER_DESCRIPTION_CHARS {
            return Err(GranthError::Validation(format!(
                "paper description must be at most {MAX_PAPER_DESCRIPTION_CHARS} characters"
            )));
        }

        let existing = self.store().count_papers().await?;
        let paper_number = u32::try_from(existing + 1)
            .map_err(|_| GranthError::Validation("too many papers".to_string()))?;
        let paper = Paper {
            id: new_id(),
            name,
            description,
            paper_number,
            created_at: Utc::now(),
        };
        self.store().insert_paper(paper.clone()).await?;
        self.catalog.refresh(&Scope::All).await;
        info!(paper_id = %paper.id, paper_number, "paper added");
        Ok(paper)
    }

    pub async fn add_tab(&self, session: &SessionContext, draft: NewTab) -> GranthResult<Tab> {
        session.require_admin()?;
        let name = required("tab name", &draft.name)?;
        let paper = self.parent(EntityKind::Paper, &draft.paper_id, CatalogEntity::into_paper).await?;

        let tab = Tab {
            id: new_id(),
            name,
            paper_id: paper.id,
            created_at: Utc::now(),
        };
        self.store().insert_tab(tab.clone()).await?;
        self.catalog.refresh(&Scope::paper(&tab.paper_id)).await;
        info!(tab_id = %tab.id, paper_id = %tab.paper_id, "tab added");
        Ok(tab)
    }

    pub async fn add_sub_folder(
        &self,
        session: &SessionContext,
        draft: NewSubFolder,
    ) -> GranthResult<SubFolder> {
        session.require_admin()?;
        let name = required("sub-folder name", &draft.name)?;
        let tab = self.parent(EntityKind::Tab, &draft.tab_id, CatalogEntity::into_tab).await?;
        if tab.paper_id != draft.paper_id {
            return Err(mismatch("tab", &tab.id, "paper", &draft.paper_id));
        }

        let sub_folder = SubFolder {
            id: new_id(),
            name,
            paper_id: tab.paper_id,
            tab_id: tab.id,
            created_at: Utc::now(),
        };
        self.store().insert_sub_folder(sub_folder.clone()).await?;
        self.catalog.refresh(&Scope::paper(&sub_folder.paper_id)).await;
        info!(sub_folder_id = %sub_folder.id, tab_id = %sub_folder.tab_id, "sub-folder added");
        Ok(sub_folder)
    }

    pub async fn add_pdf(&self, session: &SessionContext, draft: NewPdf) -> GranthResult<PdfDocument> {
        session.require_admin()?;
        let name = required("PDF name", &draft.name)?;
        let description = required("PDF description", &draft.description)?;
        let asset_link = web_link("PDF link", &draft.asset_link)?;
        let folder = self
            .parent(EntityKind::SubFolder, &draft.sub_folder_id, CatalogEntity::into_sub_folder)
            .await?;
        if folder.tab_id != draft.tab_id || folder.paper_id != draft.paper_id {
            return Err(mismatch("sub-folder", &folder.id, "tab", &draft.tab_id));
        }

        let pdf = PdfDocument {
            id: new_id(),
            name,
            description,
            asset_link,
            access: draft.access,
            paper_id: folder.paper_id,
            tab_id: folder.tab_id,
            sub_folder_id: folder.id,
            created_at: Utc::now(),
        };
        self.store().insert_pdf(pdf.clone()).await?;
        self.catalog.refresh(&Scope::paper(&pdf.paper_id)).await;
        info!(pdf_id = %pdf.id, sub_folder_id = %pdf.sub_folder_id, access = %pdf.access.access_type(), "pdf added");
        Ok(pdf)
    }

    /// Member ids are deduplicated in first-seen order and must all exist.
    pub async fn add_combo(&self, session: &SessionContext, draft: NewCombo) -> GranthResult<Combo> {
        session.require_admin()?;
        let name = required("combo name", &draft.name)?;
        let image_url = match draft.image_url.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(url) => Some(web_link("combo image URL", url)?),
        };

        let combo = Combo::new(
            new_id(),
            name,
            draft.description.trim(),
            draft.access,
            draft.member_pdf_ids.into_iter().map(|id| id.trim().to_string()),
            Utc::now(),
        );
        if combo.member_pdf_ids.is_empty() {
            return Err(GranthError::Validation(
                "a combo needs at least one PDF".to_string(),
            ));
        }
        for pdf_id in &combo.member_pdf_ids {
            self.parent(EntityKind::Pdf, pdf_id, CatalogEntity::into_pdf).await?;
        }
        let combo = match image_url {
            Some(url) => combo.with_image_url(url),
            None => combo,
        };

        self.store().insert_combo(combo.clone()).await?;
        info!(combo_id = %combo.id, members = combo.member_pdf_ids.len(), "combo added");
        Ok(combo)
    }

    fn store(&self) -> &S {
        self.catalog.store()
    }

    /// Look up a referenced record; a missing one is a validation failure.
    async fn parent<T>(
        &self,
        kind: EntityKind,
        id: &str,
        narrow: fn(CatalogEntity) -> Option<T>,
    ) -> GranthResult<T> {
        let entity = match self.store().get_by_id(kind, id).await {
            Ok(entity) => entity,
            Err(StoreError::NotFound { .. }) => {
                return Err(GranthError::Validation(format!("{kind} {id} does not exist")));
            }
            Err(e) => return Err(e.into()),
        };
        narrow(entity).ok_or_else(|| {
            GranthError::Store(StoreError::InvalidRecord {
                kind,
                id: id.to_string(),
                reason: "store returned a different kind".to_string(),
            })
        })
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn required(field: &str, value: &str) -> GranthResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GranthError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn web_link(field: &str, value: &str) -> GranthResult<String> {
    let trimmed = value.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| GranthError::Validation(format!("{field} is not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(GranthError::Validation(format!("{field} must be an http(s) URL")));
    }
    Ok(trimmed.to_string())
}

fn mismatch(child: &str, child_id: &str, parent: &str, parent_id: &str) -> GranthError {
    GranthError::Validation(format!("{child} {child_id} does not belong to {parent} {parent_id}"))
}
