//! Product catalog module.
//!
//! Backend product and category records, plus the local catalog snapshot
//! used to decorate cart lines without another backend round trip.

mod cache;
mod category;
mod product;

pub use cache::{CatalogCache, CatalogEntry, CatalogMap, PRODUCTS_STORAGE_KEY};
pub use category::Category;
pub use product::{CategoryRef, NewProduct, Product, MAX_PRODUCT_NAME_LEN};
