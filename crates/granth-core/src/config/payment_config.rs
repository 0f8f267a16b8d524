//! Payment provider configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the hosted checkout provider.
///
/// Credentials are optional: without them the payment path reports a
/// configuration error while free content keeps working.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Public key id, also handed to the client-side checkout.
    pub key_id: Option<String>,
    /// Server-side secret used for order creation.
    pub key_secret: Option<String>,
    pub api_base: String,
    /// ISO currency code for orders.
    pub currency: String,
    /// Merchant name shown in the checkout.
    pub merchant_name: String,
    pub theme_color: String,
    pub request_timeout_secs: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            key_id: None,
            key_secret: None,
            api_base: "https://api.razorpay.com".to_string(),
            currency: "INR".to_string(),
            merchant_name: "MPPSC Notes".to_string(),
            theme_color: "#6366f1".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl PaymentConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Both credentials present and non-empty.
    pub fn has_credentials(&self) -> bool {
        matches!((&self.key_id, &self.key_secret), (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty())
    }
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &self.key_secret.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("currency", &self.currency)
            .field("merchant_name", &self.merchant_name)
            .field("theme_color", &self.theme_color)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
