use granth_core::models::{OrderRequest, Price};

/// Shown when the provider gave no reason of its own.
pub const GENERIC_PAYMENT_FAILURE: &str = "Could not initiate payment. Please try again.";

/// Order for `price`, in minor units, with a fresh unique receipt.
pub fn order_request(price: Price, currency: &str) -> OrderRequest {
    OrderRequest {
        amount_minor: price.minor_units(),
        currency: currency.to_string(),
        receipt: format!("receipt_{}", uuid::Uuid::new_v4()),
    }
}
