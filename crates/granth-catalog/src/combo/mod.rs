//! Combo membership resolution.

mod resolver;

pub use resolver::resolve;
