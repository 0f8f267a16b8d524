use serde::{Deserialize, Serialize};

use granth_core::models::{Access, Combo, EntityKind, PdfDocument, PurchaseQuote};

/// Something behind the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GatedItem {
    Pdf(PdfDocument),
    Combo(Combo),
}

/// What a successful unlock hands over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UnlockedAsset {
    #[serde(rename_all = "camelCase")]
    Pdf { pdf_id: String, asset_link: String },
    /// Members are ids; resolve them against the catalog for display.
    #[serde(rename_all = "camelCase")]
    Combo {
        combo_id: String,
        member_pdf_ids: Vec<String>,
    },
}

impl GatedItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Pdf(pdf) => &pdf.id,
            Self::Combo(combo) => &combo.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Pdf(pdf) => &pdf.name,
            Self::Combo(combo) => &combo.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Pdf(pdf) => &pdf.description,
            Self::Combo(combo) => &combo.description,
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Pdf(pdf) => pdf.access,
            Self::Combo(combo) => combo.access,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Pdf(_) => EntityKind::Pdf,
            Self::Combo(_) => EntityKind::Combo,
        }
    }

    /// Purchase prompt contents. `None` for free items.
    pub fn quote(&self) -> Option<PurchaseQuote> {
        self.access().price().map(|price| PurchaseQuote {
            item_id: self.id().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            price,
        })
    }

    pub(crate) fn release(&self) -> UnlockedAsset {
        match self {
            Self::Pdf(pdf) => UnlockedAsset::Pdf {
                pdf_id: pdf.id.clone(),
                asset_link: pdf.asset_link.clone(),
            },
            Self::Combo(combo) => UnlockedAsset::Combo {
                combo_id: combo.id.clone(),
                member_pdf_ids: combo.member_pdf_ids.clone(),
            },
        }
    }
}

impl From<PdfDocument> for GatedItem {
    fn from(pdf: PdfDocument) -> Self {
        Self::Pdf(pdf)
    }
}

impl From<Combo> for GatedItem {
    fn from(combo: Combo) -> Self {
        Self::Combo(combo)
    }
}
