//! # granth-access
//!
//! Who is signed in, and what they may open.
//!
//! - `session`: the signed-in user and their per-item access states.
//! - `gate`: free/paid gating, the timed interstitial, unlock outcomes.
//! - `payment`: order and checkout payloads, and the hosted provider client.

pub mod gate;
pub mod payment;
pub mod session;

pub use gate::{
    cancel_pair, AccessGate, AccessState, CancelHandle, CancelSignal, GateDecision, GatedItem,
    Interstitial, UnlockOutcome, UnlockedAsset,
};
pub use payment::{ProviderGateway, RazorpayOrderGateway};
pub use session::{AuthEvent, SessionContext, SessionManager};
