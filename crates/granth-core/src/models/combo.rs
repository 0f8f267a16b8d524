use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::Access;

/// A named bundle of PDFs from anywhere in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combo {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub access: Access,
    /// Member PDF ids in display order, duplicates collapsed.
    #[serde(rename = "pdfIds", deserialize_with = "deserialize_member_ids")]
    pub member_pdf_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Combo {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        access: Access,
        member_pdf_ids: impl IntoIterator<Item = String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            access,
            member_pdf_ids: dedup_preserving_order(member_pdf_ids),
            image_url: None,
            created_at,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Keep the first occurrence of each id.
pub(crate) fn dedup_preserving_order(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

fn deserialize_member_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(dedup_preserving_order(raw))
}
