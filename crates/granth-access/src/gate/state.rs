use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use granth_core::errors::PaymentError;
use granth_core::models::PurchaseQuote;

use super::UnlockedAsset;
use crate::payment::GENERIC_PAYMENT_FAILURE;

/// Per-item, per-session access state.
///
/// `Locked → Unlocking → Unlocked`, or back to `Locked` when an unlock
/// fails or is abandoned. `Unlocked` is terminal for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessState {
    Locked,
    Unlocking,
    Unlocked,
}

impl fmt::Display for AccessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locked => write!(f, "locked"),
            Self::Unlocking => write!(f, "unlocking"),
            Self::Unlocked => write!(f, "unlocked"),
        }
    }
}

/// What opening an item will take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    GrantImmediate,
    GrantAfterInterstitial(Duration),
    RequirePayment(PurchaseQuote),
}

/// How an unlock request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    Unlocked(UnlockedAsset),
    /// Abandoned by the user, or superseded by an unlock already running.
    /// Nothing to show.
    Cancelled,
    /// Message for the user.
    Failed(String),
}

impl UnlockOutcome {
    pub fn asset(&self) -> Option<&UnlockedAsset> {
        match self {
            Self::Unlocked(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked(_))
    }

    /// Provider-reported failures keep their own wording; anything else
    /// gets the generic message.
    pub fn from_payment_error(error: &PaymentError) -> Self {
        match error {
            PaymentError::Cancelled => Self::Cancelled,
            PaymentError::Failed { reason } if !reason.trim().is_empty() => {
                Self::Failed(reason.clone())
            }
            _ => Self::Failed(GENERIC_PAYMENT_FAILURE.to_string()),
        }
    }
}
