use super::{PaymentError, StoreError};

/// Top-level error type for Granth.
/// Subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum GranthError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("no active session")]
    NoSession,

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias.
pub type GranthResult<T> = Result<T, GranthError>;
