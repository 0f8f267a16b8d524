//! Payment provider plumbing: order requests, checkout payloads and the
//! hosted provider's order API client.

mod checkout;
mod order;
mod razorpay;

pub use checkout::{checkout_session, DEFAULT_PREFILL_NAME};
pub use order::{order_request, GENERIC_PAYMENT_FAILURE};
pub use razorpay::{ProviderGateway, RazorpayOrderGateway};
