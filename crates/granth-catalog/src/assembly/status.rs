//! Load status of a scope, as the UI consumes it.

use std::sync::Arc;

use granth_core::errors::{RecoveryAction, StoreError};
use granth_core::models::CatalogTree;

use super::MaterializedTree;

/// Why a tree could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLoadError {
    pub message: String,
    pub recovery: RecoveryAction,
}

impl TreeLoadError {
    /// Whether the UI should offer a retry rather than a dead end.
    pub fn is_retryable(&self) -> bool {
        self.recovery == RecoveryAction::Retry
    }
}

impl From<&StoreError> for TreeLoadError {
    fn from(error: &StoreError) -> Self {
        Self {
            message: error.to_string(),
            recovery: RecoveryAction::for_store_error(error),
        }
    }
}

/// Loading vs. ready vs. error, kept apart so "no results" never reads as
/// "not loaded yet".
#[derive(Debug, Clone)]
pub enum TreeStatus {
    /// Never requested, or refreshed since.
    Idle,
    Loading,
    Ready(Arc<MaterializedTree>),
    Error(TreeLoadError),
}

impl TreeStatus {
    pub fn tree(&self) -> Option<&CatalogTree> {
        match self {
            Self::Ready(materialized) => Some(&materialized.tree),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&TreeLoadError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}
