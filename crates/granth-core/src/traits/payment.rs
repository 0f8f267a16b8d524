//! Payment provider boundary: server-side order creation and the client-side
//! checkout surface.

use std::future::Future;

use crate::errors::PaymentError;
use crate::models::{CheckoutResult, CheckoutSession, Order, OrderRequest, PurchaseQuote};

/// Creates remote orders. Runs server side, holds the secret.
pub trait IOrderGateway: Send + Sync {
    fn create_order(
        &self,
        request: OrderRequest,
    ) -> impl Future<Output = Result<Order, PaymentError>> + Send;
}

/// The checkout UI the user interacts with.
pub trait ICheckout: Send + Sync {
    /// Show price and description; resolves to `true` on explicit confirm.
    fn confirm(&self, quote: &PurchaseQuote) -> impl Future<Output = bool> + Send;

    /// Open the hosted checkout for an order and wait for it to finish.
    fn open(&self, session: CheckoutSession) -> impl Future<Output = CheckoutResult> + Send;
}
