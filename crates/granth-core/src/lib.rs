//! # granth-core
//!
//! Foundation crate for the Granth exam-prep content catalog.
//! Defines the catalog entities, the materialized content tree, the store and
//! payment-provider traits, errors, config and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::GranthConfig;
pub use errors::{GranthError, GranthResult, PaymentError, StoreError};
