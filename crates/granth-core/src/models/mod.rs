mod access;
mod combo;
mod entity;
mod paper;
mod payment;
mod pdf_document;
mod scope;
mod sub_folder;
mod tab;
mod tree;
mod user;

pub use access::{Access, AccessType, Price};
pub use combo::Combo;
pub use entity::{CatalogEntity, ChildKind, EntityKind};
pub use paper::Paper;
pub use payment::{CheckoutResult, CheckoutSession, Order, OrderRequest, Prefill, PurchaseQuote};
pub use pdf_document::PdfDocument;
pub use scope::Scope;
pub use sub_folder::SubFolder;
pub use tab::Tab;
pub use tree::{CatalogTree, DegradedBranch, PaperNode, SubFolderNode, TabNode};
pub use user::{Role, User};
