//! AccessGate — free/paid gating over an order gateway and a checkout surface.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use granth_core::config::{AccessConfig, PaymentConfig};
use granth_core::models::{Access, CheckoutResult, PurchaseQuote};
use granth_core::traits::{ICheckout, IOrderGateway};

use super::{AccessState, CancelSignal, GateDecision, GatedItem, Interstitial, UnlockOutcome};
use crate::payment::{checkout_session, order_request, GENERIC_PAYMENT_FAILURE};
use crate::session::SessionContext;

pub struct AccessGate<G, C> {
    orders: Arc<G>,
    checkout: Arc<C>,
    access: AccessConfig,
    payment: PaymentConfig,
}

impl<G: IOrderGateway, C: ICheckout> AccessGate<G, C> {
    pub fn new(orders: Arc<G>, checkout: Arc<C>, access: AccessConfig, payment: PaymentConfig) -> Self {
        Self {
            orders,
            checkout,
            access,
            payment,
        }
    }

    /// Free items read as `Unlocked` except while their interstitial runs.
    pub fn access_state(&self, item: &GatedItem, session: &SessionContext) -> AccessState {
        let recorded = session.access_state(item.id());
        if item.access().is_free() && recorded != AccessState::Unlocking {
            return AccessState::Unlocked;
        }
        recorded
    }

    pub fn decide(&self, item: &GatedItem, session: &SessionContext) -> GateDecision {
        match item.access() {
            Access::Free => self.after_interstitial(),
            Access::Paid { price } => {
                if session.is_unlocked(item.id()) {
                    GateDecision::GrantImmediate
                } else {
                    GateDecision::RequirePayment(PurchaseQuote {
                        item_id: item.id().to_string(),
                        name: item.name().to_string(),
                        description: item.description().to_string(),
                        price,
                    })
                }
            }
        }
    }

    /// Drive `item` from its current state to an outcome.
    ///
    /// Only a paid success changes what the session remembers. A second
    /// request for an item already unlocking gets `Cancelled`.
    pub async fn request_unlock(
        &self,
        item: &GatedItem,
        session: &SessionContext,
        mut cancel: CancelSignal,
    ) -> UnlockOutcome {
        let decision = self.decide(item, session);
        if decision == GateDecision::GrantImmediate {
            debug!(item_id = %item.id(), "granted without gating");
            return UnlockOutcome::Unlocked(item.release());
        }
        if !session.try_begin_unlock(item.id()) {
            debug!(item_id = %item.id(), "unlock already in progress; request dropped");
            return UnlockOutcome::Cancelled;
        }
        let mut pending = PendingUnlock::new(session, item);

        match decision {
            GateDecision::GrantAfterInterstitial(delay) => {
                if Interstitial::start(delay).wait(&mut cancel).await {
                    info!(item_id = %item.id(), "interstitial completed; asset released");
                    UnlockOutcome::Unlocked(item.release())
                } else {
                    debug!(item_id = %item.id(), "interstitial cancelled");
                    UnlockOutcome::Cancelled
                }
            }
            GateDecision::RequirePayment(quote) => {
                self.purchase(item, quote, session, &mut cancel, &mut pending)
                    .await
            }
            GateDecision::GrantImmediate => UnlockOutcome::Unlocked(item.release()),
        }
    }

    fn after_interstitial(&self) -> GateDecision {
        let delay = self.access.interstitial_delay();
        if delay.is_zero() {
            GateDecision::GrantImmediate
        } else {
            GateDecision::GrantAfterInterstitial(delay)
        }
    }

    async fn purchase(
        &self,
        item: &GatedItem,
        quote: PurchaseQuote,
        session: &SessionContext,
        cancel: &mut CancelSignal,
        pending: &mut PendingUnlock<'_>,
    ) -> UnlockOutcome {
        if !self.checkout.confirm(&quote).await || cancel.is_cancelled() {
            debug!(item_id = %item.id(), "purchase not confirmed");
            return UnlockOutcome::Cancelled;
        }

        let request = order_request(quote.price, &self.payment.currency);
        let order = match self.orders.create_order(request).await {
            Ok(order) => order,
            Err(e) => {
                warn!(item_id = %item.id(), error = %e, "order creation failed");
                return UnlockOutcome::from_payment_error(&e);
            }
        };
        let order_id = order.id.clone();
        let checkout = match checkout_session(&self.payment, order, &quote, session.user()) {
            Ok(checkout) => checkout,
            Err(e) => {
                warn!(item_id = %item.id(), error = %e, "checkout could not be opened");
                return UnlockOutcome::from_payment_error(&e);
            }
        };

        match self.checkout.open(checkout).await {
            CheckoutResult::Succeeded { payment_id } => {
                info!(
                    item_id = %item.id(),
                    order_id = %order_id,
                    payment_id = %payment_id,
                    "payment succeeded; item unlocked for this session"
                );
                pending.settle(AccessState::Unlocked);
                self.release_paid(item, cancel).await
            }
            CheckoutResult::Failed { reason } => {
                let message = reason
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_PAYMENT_FAILURE.to_string());
                warn!(item_id = %item.id(), order_id = %order_id, reason = %message, "payment failed");
                UnlockOutcome::Failed(message)
            }
            CheckoutResult::Dismissed => {
                debug!(item_id = %item.id(), order_id = %order_id, "checkout dismissed");
                UnlockOutcome::Cancelled
            }
        }
    }

    /// Paid assets skip the interstitial unless configured otherwise. The
    /// purchase stands even if that interstitial is cancelled.
    async fn release_paid(&self, item: &GatedItem, cancel: &mut CancelSignal) -> UnlockOutcome {
        let delay: Duration = self.access.interstitial_delay();
        if !self.access.paid_requires_interstitial || delay.is_zero() {
            return UnlockOutcome::Unlocked(item.release());
        }
        if Interstitial::start(delay).wait(cancel).await {
            UnlockOutcome::Unlocked(item.release())
        } else {
            UnlockOutcome::Cancelled
        }
    }
}

/// Holds an item in `Unlocking`. Unless settled, dropping it puts the item
/// back where it started: `Locked` for paid items, untracked for free ones.
struct PendingUnlock<'a> {
    session: &'a SessionContext,
    item_id: String,
    restore: Option<AccessState>,
    settled: bool,
}

impl<'a> PendingUnlock<'a> {
    fn new(session: &'a SessionContext, item: &GatedItem) -> Self {
        let restore = (!item.access().is_free()).then_some(AccessState::Locked);
        Self {
            session,
            item_id: item.id().to_string(),
            restore,
            settled: false,
        }
    }

    fn settle(&mut self, state: AccessState) {
        self.session.set_access_state(&self.item_id, state);
        self.settled = true;
    }
}

impl Drop for PendingUnlock<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        match self.restore {
            Some(state) => self.session.set_access_state(&self.item_id, state),
            None => self.session.clear_access_state(&self.item_id),
        }
    }
}
