//! Payloads exchanged with the payment provider.

use serde::{Deserialize, Serialize};

use super::Price;

/// Server-side order creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Amount in the currency's smallest unit.
    #[serde(rename = "amount")]
    pub amount_minor: u64,
    pub currency: String,
    pub receipt: String,
}

/// An order created by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(rename = "amount")]
    pub amount_minor: u64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// What the purchase prompt shows before the user confirms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseQuote {
    pub item_id: String,
    pub name: String,
    pub description: String,
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Everything the client-side checkout needs to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    /// Public key id (never the secret).
    pub key: String,
    pub order: Order,
    pub name: String,
    pub description: String,
    pub prefill: Prefill,
    pub theme_color: String,
}

/// How the checkout ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutResult {
    Succeeded { payment_id: String },
    /// Provider-reported failure, with its description when it gave one.
    Failed { reason: Option<String> },
    /// Closed by the user.
    Dismissed,
}
