//! RecoveryAction: what the caller should do when an operation fails.

use std::fmt;

use super::{GranthError, PaymentError, StoreError};

/// Recommended recovery action for a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Offer a retry (transient store outage).
    Retry,
    /// Degrade: skip the item or render an empty state.
    Fallback,
    /// Surface to the user. Cannot be handled silently.
    Escalate,
    /// Say nothing (user-initiated abort).
    Ignore,
}

impl RecoveryAction {
    pub fn for_store_error(error: &StoreError) -> Self {
        match error {
            StoreError::Unavailable { .. } | StoreError::Timeout { .. } => Self::Retry,
            StoreError::NotFound { .. } => Self::Fallback,
            StoreError::InvalidRecord { .. } => Self::Fallback,
        }
    }

    pub fn for_payment_error(error: &PaymentError) -> Self {
        match error {
            PaymentError::Cancelled => Self::Ignore,
            PaymentError::Failed { .. } => Self::Escalate,
            PaymentError::Configuration { .. } => Self::Escalate,
            PaymentError::OrderCreation { .. } => Self::Escalate,
        }
    }

    /// Determine the recommended recovery action for a GranthError.
    pub fn for_error(error: &GranthError) -> Self {
        match error {
            GranthError::Store(e) => Self::for_store_error(e),
            GranthError::Payment(e) => Self::for_payment_error(e),
            GranthError::Validation(_) => Self::Escalate,
            GranthError::Unauthorized { .. } => Self::Escalate,
            GranthError::NoSession => Self::Escalate,
            GranthError::Config(_) => Self::Escalate,
            GranthError::Serialization(_) => Self::Escalate,
        }
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retry => write!(f, "Retry"),
            Self::Fallback => write!(f, "Fallback"),
            Self::Escalate => write!(f, "Escalate"),
            Self::Ignore => write!(f, "Ignore"),
        }
    }
}
