//! Serializable dump of every catalog collection.

use serde::{Deserialize, Serialize};

use granth_core::models::{Combo, Paper, PdfDocument, SubFolder, Tab};

/// Flat collections, one per entity kind, with parent ids as back-references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub papers: Vec<Paper>,
    pub tabs: Vec<Tab>,
    pub sub_folders: Vec<SubFolder>,
    pub pdfs: Vec<PdfDocument>,
    pub combos: Vec<Combo>,
}

impl CatalogSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn record_count(&self) -> usize {
        self.papers.len() + self.tabs.len() + self.sub_folders.len() + self.pdfs.len() + self.combos.len()
    }
}
