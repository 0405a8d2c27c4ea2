//! Local key-value storage for the hbspa storefront.
//!
//! The storefront keeps its client-side state (cart, catalog snapshot,
//! credentials) in a flat string key-value store, the same shape a browser
//! exposes as `localStorage`. This crate provides:
//!
//! - [`Store`]: the storage seam, implemented by [`MemoryStore`] and
//!   [`FileStore`]
//! - [`Cache`]: a cheap-to-clone handle with automatic JSON serialization
//!
//! # Example
//!
//! ```rust
//! use hbspa_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Prefs {
//!     locale: String,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("prefs", &Prefs { locale: "es-MX".into() })?;
//!
//! let prefs: Option<Prefs> = cache.get("prefs")?;
//! assert_eq!(prefs.unwrap().locale, "es-MX");
//! # Ok::<(), hbspa_cache::CacheError>(())
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, MemoryStore, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, Store};
}
