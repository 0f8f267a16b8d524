use std::collections::HashSet;

use tracing::debug;

use granth_core::models::{Combo, PdfDocument};

use crate::assembly::TreeIndex;

/// Member documents of `combo` in the combo's own order.
///
/// Ids the index does not know (deleted, or outside the tree) are skipped.
/// A repeated id yields its document once.
pub fn resolve(combo: &Combo, index: &TreeIndex) -> Vec<PdfDocument> {
    let mut seen = HashSet::new();
    let mut members = Vec::with_capacity(combo.member_pdf_ids.len());
    for pdf_id in &combo.member_pdf_ids {
        if !seen.insert(pdf_id.as_str()) {
            continue;
        }
        match index.get(pdf_id) {
            Some(pdf) => members.push(pdf.clone()),
            None => debug!(combo_id = %combo.id, pdf_id = %pdf_id, "combo member not in tree; skipped"),
        }
    }
    members
}
