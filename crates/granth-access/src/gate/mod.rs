//! The access gate: decides grant-now, grant-after-interstitial or
//! require-payment for a PDF or combo, and drives that path to an outcome.

mod access_gate;
mod interstitial;
mod item;
mod state;

pub use access_gate::AccessGate;
pub use interstitial::{cancel_pair, CancelHandle, CancelSignal, Interstitial};
pub use item::{GatedItem, UnlockedAsset};
pub use state::{AccessState, GateDecision, UnlockOutcome};
