use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level subject. Root of the content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display order. Need not be contiguous.
    pub paper_number: u32,
    pub created_at: DateTime<Utc>,
}
