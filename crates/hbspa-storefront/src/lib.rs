//! # hbspa-storefront
//!
//! Page controllers for the hbspa storefront: catalog listing, optimistic
//! add-to-cart, the admin product panel, spa bookings, the shopper profile
//! and the contact form.
//!
//! ```no_run
//! use hbspa_cache::{Cache, FileStore};
//! use hbspa_data::FetchClient;
//! use hbspa_storefront::{Storefront, DEFAULT_API_BASE};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = Cache::new(FileStore::open(".hbspa/storage.json")?);
//! let shop = Storefront::new(cache, FetchClient::new().with_base_url(DEFAULT_API_BASE));
//!
//! if let Some(products) = shop.catalog().load_products().await.ready() {
//!     println!("{} productos", products.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod pages;
pub mod region;
pub mod storefront;

pub use api::{AddToCartRequest, StorefrontApi, DEFAULT_API_BASE};
pub use error::StorefrontError;
pub use pages::*;
pub use region::{FormMessage, MessageKind, Region, SyncStatus};
pub use storefront::Storefront;
