//! # test-fixtures
//!
//! Doubles and canned catalogs shared by the workspace's integration tests.

pub mod payment;
pub mod scenarios;
pub mod store;

pub use payment::{ScriptedCheckout, ScriptedOrderGateway};
pub use store::{InstrumentedStore, StoreOp};
