//! # granth-portal
//!
//! The surface the UI talks to: content trees and search, combos, the
//! signed-in session, unlocking, and the admin authoring operations.

pub mod authoring;
pub mod portal;

pub use authoring::{CatalogAuthoring, NewCombo, NewPaper, NewPdf, NewSubFolder, NewTab};
pub use portal::Portal;
