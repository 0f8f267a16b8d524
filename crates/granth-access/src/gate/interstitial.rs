//! The timed ad step in front of free assets.
//!
//! The asset is withheld until the deadline and released as soon as it
//! passes. Cancelling (the user navigating away) ends the wait early with
//! nothing released.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Cancels the request its paired `CancelSignal` was handed to.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Observes cancellation of one unlock request.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        cancel_pair().1
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancelled. Pends forever if the handle is dropped
    /// without cancelling.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// About 30 years.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// One running interstitial.
#[derive(Debug, Clone, Copy)]
pub struct Interstitial {
    deadline: Instant,
}

impl Interstitial {
    /// Deadlines past the timer's range are clamped to one far in the future.
    pub fn start(delay: Duration) -> Self {
        let now = Instant::now();
        Self {
            deadline: now.checked_add(delay).unwrap_or_else(|| now + FAR_FUTURE),
        }
    }

    /// Wait out the delay. `false` when cancelled first.
    pub async fn wait(self, cancel: &mut CancelSignal) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep_until(self.deadline) => true,
        }
    }
}
