use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A topic within a paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub name: String,
    pub paper_id: String,
    pub created_at: DateTime<Utc>,
}
