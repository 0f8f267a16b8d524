mod granth_error;
mod payment_error;
mod recovery;
mod store_error;

pub use granth_error::{GranthError, GranthResult};
pub use payment_error::PaymentError;
pub use recovery::RecoveryAction;
pub use store_error::StoreError;
