use granth_core::config::{PaymentConfig, ENV_PAYMENT_KEY_ID};
use granth_core::errors::PaymentError;
use granth_core::models::{CheckoutSession, Order, Prefill, PurchaseQuote, User};

/// Prefilled payer name when the profile has none.
pub const DEFAULT_PREFILL_NAME: &str = "Student";

/// Payload the client-side checkout opens with. Carries the public key id
/// only; fails with `Configuration` when it is not set.
pub fn checkout_session(
    config: &PaymentConfig,
    order: Order,
    quote: &PurchaseQuote,
    user: &User,
) -> Result<CheckoutSession, PaymentError> {
    let key = config
        .key_id
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| PaymentError::Configuration {
            missing: ENV_PAYMENT_KEY_ID.to_string(),
        })?;

    let name = match user.full_name.trim() {
        "" => DEFAULT_PREFILL_NAME.to_string(),
        full_name => full_name.to_string(),
    };
    let email = Some(user.email.clone()).filter(|email| !email.trim().is_empty());

    Ok(CheckoutSession {
        key,
        order,
        name: config.merchant_name.clone(),
        description: format!("Payment for {}", quote.name),
        prefill: Prefill { name, email },
        theme_color: config.theme_color.clone(),
    })
}
