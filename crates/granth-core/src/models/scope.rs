use std::fmt;

use serde::{Deserialize, Serialize};

/// Root over which a tree is materialized: every paper, or just one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    All,
    Paper(String),
}

impl Scope {
    pub fn paper(id: impl Into<String>) -> Self {
        Self::Paper(id.into())
    }

    /// Whether a change under `paper_id` can affect this scope's tree.
    pub fn covers_paper(&self, paper_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Paper(id) => id == paper_id,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Paper(id) => write!(f, "paper:{id}"),
        }
    }
}
