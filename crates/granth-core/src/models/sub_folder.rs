use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A folder within a tab. Holds PDFs directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubFolder {
    pub id: String,
    pub name: String,
    pub paper_id: String,
    pub tab_id: String,
    pub created_at: DateTime<Utc>,
}

impl SubFolder {
    /// Parent ids agree with the tab this folder hangs under.
    pub fn is_consistent_with(&self, tab: &super::Tab) -> bool {
        self.tab_id == tab.id && self.paper_id == tab.paper_id
    }
}
