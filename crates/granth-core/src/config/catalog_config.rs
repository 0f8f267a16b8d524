//! Catalog resolution configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for tree assembly and the tree cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Maximum concurrent in-flight store reads within one tree level.
    pub fan_out_limit: usize,
    /// Per-read timeout. A read that exceeds it fails its branch.
    pub read_timeout_ms: u64,
    /// Upper bound on cached scopes. `None` keeps every scope until refreshed.
    pub max_cached_scopes: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fan_out_limit: 20,
            read_timeout_ms: 15_000,
            max_cached_scopes: None,
        }
    }
}

impl CatalogConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
