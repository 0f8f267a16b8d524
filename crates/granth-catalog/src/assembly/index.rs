//! By-id lookup of every PDF in a materialized tree.

use std::collections::HashMap;

use granth_core::models::{CatalogTree, PdfDocument};

/// Side table from PDF id to document, built while the tree is assembled.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    pdfs: HashMap<String, PdfDocument>,
}

impl TreeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index an already materialized tree.
    pub fn from_tree(tree: &CatalogTree) -> Self {
        let mut index = Self::new();
        for pdf in tree.pdfs() {
            index.insert(pdf);
        }
        index
    }

    pub fn insert(&mut self, pdf: &PdfDocument) {
        self.pdfs.insert(pdf.id.clone(), pdf.clone());
    }

    pub fn get(&self, pdf_id: &str) -> Option<&PdfDocument> {
        self.pdfs.get(pdf_id)
    }

    pub fn contains(&self, pdf_id: &str) -> bool {
        self.pdfs.contains_key(pdf_id)
    }

    pub fn len(&self) -> usize {
        self.pdfs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pdfs.is_empty()
    }
}
