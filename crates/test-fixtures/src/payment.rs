//! Scripted payment doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;

use granth_core::errors::PaymentError;
use granth_core::models::{CheckoutResult, CheckoutSession, Order, OrderRequest, PurchaseQuote};
use granth_core::traits::{ICheckout, IOrderGateway};

/// Order gateway that echoes the request back as a created order, or fails.
#[derive(Debug)]
pub struct ScriptedOrderGateway {
    failure: Option<PaymentError>,
    requests: Mutex<Vec<OrderRequest>>,
}

impl ScriptedOrderGateway {
    pub fn succeeding() -> Self {
        Self {
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: PaymentError) -> Self {
        Self {
            failure: Some(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().await.clone()
    }
}

impl IOrderGateway for ScriptedOrderGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<Order, PaymentError> {
        let mut requests = self.requests.lock().await;
        requests.push(request.clone());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(Order {
            id: format!("order_test_{}", requests.len()),
            amount_minor: request.amount_minor,
            currency: request.currency,
            receipt: Some(request.receipt),
            status: Some("created".to_string()),
        })
    }
}

/// Checkout surface with a fixed answer to the purchase prompt and a fixed
/// checkout outcome, optionally after a delay.
#[derive(Debug)]
pub struct ScriptedCheckout {
    confirm: bool,
    outcome: CheckoutResult,
    delay: Duration,
    confirms: AtomicUsize,
    quotes: Mutex<Vec<PurchaseQuote>>,
    sessions: Mutex<Vec<CheckoutSession>>,
}

impl ScriptedCheckout {
    /// Confirms the prompt, then finishes checkout with `outcome`.
    pub fn approving(outcome: CheckoutResult) -> Self {
        Self::new(true, outcome)
    }

    /// Declines the purchase prompt.
    pub fn declining() -> Self {
        Self::new(false, CheckoutResult::Dismissed)
    }

    pub fn paying(payment_id: &str) -> Self {
        Self::approving(CheckoutResult::Succeeded {
            payment_id: payment_id.to_string(),
        })
    }

    fn new(confirm: bool, outcome: CheckoutResult) -> Self {
        Self {
            confirm,
            outcome,
            delay: Duration::ZERO,
            confirms: AtomicUsize::new(0),
            quotes: Mutex::new(Vec::new()),
            sessions: Mutex::new(Vec::new()),
        }
    }

    /// Hold the checkout open for `delay` before resolving.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn confirm_calls(&self) -> usize {
        self.confirms.load(Ordering::SeqCst)
    }

    pub async fn quotes(&self) -> Vec<PurchaseQuote> {
        self.quotes.lock().await.clone()
    }

    pub async fn opened_sessions(&self) -> Vec<CheckoutSession> {
        self.sessions.lock().await.clone()
    }
}

impl ICheckout for ScriptedCheckout {
    async fn confirm(&self, quote: &PurchaseQuote) -> bool {
        self.confirms.fetch_add(1, Ordering::SeqCst);
        self.quotes.lock().await.push(quote.clone());
        self.confirm
    }

    async fn open(&self, session: CheckoutSession) -> CheckoutResult {
        self.sessions.lock().await.push(session);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}
