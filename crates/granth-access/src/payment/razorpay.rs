//! Order creation against the hosted provider's REST API.

use std::fmt;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use granth_core::config::{PaymentConfig, ENV_PAYMENT_KEY_ID, ENV_PAYMENT_KEY_SECRET};
use granth_core::errors::PaymentError;
use granth_core::models::{Order, OrderRequest};
use granth_core::traits::IOrderGateway;

const ORDERS_PATH: &str = "/v1/orders";

/// Server-side order gateway. Holds the key secret, so it never runs in the
/// client.
pub struct RazorpayOrderGateway {
    client: Client,
    endpoint: String,
    key_id: String,
    key_secret: String,
}

/// Error body the provider returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl RazorpayOrderGateway {
    /// Fails with `Configuration` naming the first missing credential.
    pub fn from_config(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let key_id = required(&config.key_id, ENV_PAYMENT_KEY_ID)?;
        let key_secret = required(&config.key_secret, ENV_PAYMENT_KEY_SECRET)?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PaymentError::Configuration {
                missing: format!("http client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: orders_endpoint(&config.api_base),
            key_id,
            key_secret,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn required(value: &Option<String>, name: &str) -> Result<String, PaymentError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| PaymentError::Configuration {
            missing: name.to_string(),
        })
}

fn orders_endpoint(api_base: &str) -> String {
    format!("{}{ORDERS_PATH}", api_base.trim_end_matches('/'))
}

impl fmt::Debug for RazorpayOrderGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RazorpayOrderGateway")
            .field("endpoint", &self.endpoint)
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

impl IOrderGateway for RazorpayOrderGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<Order, PaymentError> {
        debug!(
            amount_minor = request.amount_minor,
            currency = %request.currency,
            receipt = %request.receipt,
            "creating order"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    format!("order request timed out: {e}")
                } else if e.is_connect() {
                    format!("could not reach payment provider: {e}")
                } else {
                    format!("order request failed: {e}")
                };
                PaymentError::OrderCreation { reason }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = match serde_json::from_str::<ProviderErrorBody>(&body) {
                Ok(parsed) => {
                    let code = parsed.error.code.unwrap_or_else(|| status.to_string());
                    match parsed.error.description {
                        Some(description) => format!("{code}: {description}"),
                        None => code,
                    }
                }
                Err(_) => format!("provider returned {status}"),
            };
            warn!(status = %status, reason = %reason, "order creation rejected");
            return Err(PaymentError::OrderCreation { reason });
        }

        response.json::<Order>().await.map_err(|e| PaymentError::OrderCreation {
            reason: format!("unreadable order response: {e}"),
        })
    }
}

/// The provider gateway when credentials are configured. Without them every
/// order fails with the configuration error and nothing else is affected.
#[derive(Debug)]
pub enum ProviderGateway {
    Ready(RazorpayOrderGateway),
    Unconfigured(PaymentError),
}

impl ProviderGateway {
    pub fn from_config(config: &PaymentConfig) -> Self {
        match RazorpayOrderGateway::from_config(config) {
            Ok(gateway) => Self::Ready(gateway),
            Err(e) => {
                warn!(error = %e, "payment provider unavailable; paid items cannot be unlocked");
                Self::Unconfigured(e)
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl IOrderGateway for ProviderGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<Order, PaymentError> {
        match self {
            Self::Ready(gateway) => gateway.create_order(request).await,
            Self::Unconfigured(e) => Err(e.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> PaymentConfig {
        PaymentConfig {
            key_id: Some("rzp_test_key".to_string()),
            key_secret: Some("shh".to_string()),
            ..PaymentConfig::default()
        }
    }

    #[test]
    fn missing_key_id_is_a_configuration_error() {
        let config = PaymentConfig {
            key_secret: Some("shh".to_string()),
            ..PaymentConfig::default()
        };
        let err = RazorpayOrderGateway::from_config(&config).unwrap_err();
        assert_eq!(
            err,
            PaymentError::Configuration {
                missing: ENV_PAYMENT_KEY_ID.to_string()
            }
        );
    }

    #[test]
    fn blank_secret_is_a_configuration_error() {
        let mut config = configured();
        config.key_secret = Some("   ".to_string());
        let err = RazorpayOrderGateway::from_config(&config).unwrap_err();
        assert!(matches!(err, PaymentError::Configuration { ref missing } if missing == ENV_PAYMENT_KEY_SECRET));
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let mut config = configured();
        config.api_base = "https://api.example.test/".to_string();
        let gateway = RazorpayOrderGateway::from_config(&config).unwrap();
        assert_eq!(gateway.endpoint(), "https://api.example.test/v1/orders");
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let gateway = RazorpayOrderGateway::from_config(&configured()).unwrap();
        let rendered = format!("{gateway:?}");
        assert!(rendered.contains("rzp_test_key"));
        assert!(!rendered.contains("shh"));
    }

    #[tokio::test]
    async fn unconfigured_provider_fails_every_order() {
        let gateway = ProviderGateway::from_config(&PaymentConfig::default());
        assert!(!gateway.is_configured());

        let request = OrderRequest {
            amount_minor: 9_900,
            currency: "INR".to_string(),
            receipt: "receipt_test".to_string(),
        };
        let err = gateway.create_order(request).await.unwrap_err();
        assert!(matches!(err, PaymentError::Configuration { .. }));
    }

    #[test]
    fn provider_error_body_parses() {
        let body = r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"amount must be at least INR 1.00"}}"#;
        let parsed: ProviderErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.code.as_deref(), Some("BAD_REQUEST_ERROR"));
        assert!(parsed.error.description.unwrap().contains("INR 1.00"));
    }
}
