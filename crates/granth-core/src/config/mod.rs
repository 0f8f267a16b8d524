pub mod access_config;
pub mod catalog_config;
pub mod observability_config;
pub mod payment_config;

use serde::{Deserialize, Serialize};

pub use access_config::AccessConfig;
pub use catalog_config::CatalogConfig;
pub use observability_config::ObservabilityConfig;
pub use payment_config::PaymentConfig;

use crate::errors::{GranthError, GranthResult};

/// Env var holding the payment provider's public key id.
pub const ENV_PAYMENT_KEY_ID: &str = "RAZORPAY_KEY_ID";
/// Env var holding the payment provider's secret.
pub const ENV_PAYMENT_KEY_SECRET: &str = "RAZORPAY_KEY_SECRET";

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GranthConfig {
    pub catalog: CatalogConfig,
    pub access: AccessConfig,
    pub payment: PaymentConfig,
    pub observability: ObservabilityConfig,
}

impl GranthConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Fill payment credentials from the environment when the file left them unset.
    pub fn with_env_overrides(mut self) -> Self {
        if self.payment.key_id.is_none() {
            self.payment.key_id = std::env::var(ENV_PAYMENT_KEY_ID).ok().filter(|v| !v.is_empty());
        }
        if self.payment.key_secret.is_none() {
            self.payment.key_secret =
                std::env::var(ENV_PAYMENT_KEY_SECRET).ok().filter(|v| !v.is_empty());
        }
        self
    }

    /// Reject values the runtime cannot work with.
    ///
    /// Missing payment credentials are NOT rejected here: they only disable the
    /// payment path, which reports `PaymentError::Configuration` on use.
    pub fn validate(&self) -> GranthResult<()> {
        if self.catalog.fan_out_limit == 0 {
            return Err(GranthError::Config(
                "catalog.fan_out_limit must be at least 1".to_string(),
            ));
        }
        if self.catalog.read_timeout_ms == 0 {
            return Err(GranthError::Config(
                "catalog.read_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.payment.currency.trim().is_empty() {
            return Err(GranthError::Config("payment.currency must not be empty".to_string()));
        }
        Ok(())
    }
}
