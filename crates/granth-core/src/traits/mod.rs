mod catalog_store;
mod payment;

pub use catalog_store::{ICatalogStore, ICatalogWriter};
pub use payment::{ICheckout, IOrderGateway};
