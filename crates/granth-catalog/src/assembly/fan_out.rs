//! Bounded concurrent child reads for one tree level.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use granth_core::errors::StoreError;
use granth_core::models::{CatalogEntity, ChildKind};
use granth_core::traits::ICatalogStore;

/// Run one store read under the configured timeout.
pub async fn with_timeout<T>(
    limit: Duration,
    read: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(limit, read).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout {
            millis: limit.as_millis() as u64,
        }),
    }
}

/// Issues sibling reads concurrently, never more than `limit` at once.
///
/// The semaphore is shared by every assembly the engine runs, so the bound
/// holds across scopes as well as within one level.
pub struct FanOut<S> {
    store: Arc<S>,
    limiter: Arc<Semaphore>,
    read_timeout: Duration,
}

impl<S: ICatalogStore> FanOut<S> {
    pub fn new(store: Arc<S>, limit: usize, read_timeout: Duration) -> Self {
        Self {
            store,
            limiter: Arc::new(Semaphore::new(limit.max(1))),
            read_timeout,
        }
    }

    /// Read the children of every parent. Results line up with `parent_ids`
    /// regardless of completion order.
    pub async fn children(
        &self,
        kind: ChildKind,
        parent_ids: &[String],
    ) -> Vec<Result<Vec<CatalogEntity>, StoreError>> {
        let mut slots: Vec<Option<Result<Vec<CatalogEntity>, StoreError>>> =
            (0..parent_ids.len()).map(|_| None).collect();
        let mut reads = JoinSet::new();

        for (slot, parent_id) in parent_ids.iter().cloned().enumerate() {
            let store = Arc::clone(&self.store);
            let limiter = Arc::clone(&self.limiter);
            let limit = self.read_timeout;
            reads.spawn(async move {
                let result = match limiter.acquire_owned().await {
                    Ok(_permit) => with_timeout(limit, store.list_children(kind, &parent_id)).await,
                    Err(_) => Err(StoreError::unavailable("fan-out limiter closed")),
                };
                (slot, result)
            });
        }

        while let Some(joined) = reads.join_next().await {
            match joined {
                Ok((slot, result)) => slots[slot] = Some(result),
                Err(e) => warn!(child_kind = %kind, error = %e, "child read task did not complete"),
            }
        }

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| Err(StoreError::unavailable("child read task aborted"))))
            .collect()
    }
}
