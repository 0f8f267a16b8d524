use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Access, SubFolder};

/// A study-material link. Leaf of the content tree.
///
/// Parent ids are denormalized onto the leaf so ancestry checks and combo
/// resolution never walk the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfDocument {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Opaque external URL of the asset.
    pub asset_link: String,
    #[serde(flatten)]
    pub access: Access,
    pub paper_id: String,
    pub tab_id: String,
    pub sub_folder_id: String,
    pub created_at: DateTime<Utc>,
}

impl PdfDocument {
    /// Parent ids agree with the folder this document hangs under.
    pub fn is_consistent_with(&self, folder: &SubFolder) -> bool {
        self.sub_folder_id == folder.id
            && self.tab_id == folder.tab_id
            && self.paper_id == folder.paper_id
    }
}
