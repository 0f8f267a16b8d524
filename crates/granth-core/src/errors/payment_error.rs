/// Payment path errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    /// Provider-reported failure. The reason is shown to the user verbatim.
    #[error("payment failed: {reason}")]
    Failed { reason: String },

    /// The user closed the checkout or declined the purchase.
    #[error("payment cancelled")]
    Cancelled,

    #[error("payment provider not configured: {missing}")]
    Configuration { missing: String },

    #[error("order creation failed: {reason}")]
    OrderCreation { reason: String },
}
