//! Storefront domain types and client-side cart logic for hbspa.
//!
//! This crate provides the pieces the storefront pages share:
//!
//! - **Cart**: the persisted product-id to quantity mapping, the store that
//!   mutates it and the channel announcing every change
//! - **Catalog**: backend product records and the local display snapshot
//! - **Booking**: spa services and reservation requests
//! - **Account** and **Contact**: profile records and form validation
//!
//! # Example
//!
//! ```rust
//! use hbspa_cache::{Cache, MemoryStore};
//! use hbspa_commerce::prelude::*;
//!
//! let cache = Cache::new(MemoryStore::new());
//! let store = CartStore::new(cache.clone(), NotificationChannel::new());
//! let catalog = CatalogCache::new(cache);
//!
//! store.increment(&ProductId::new("7"), 2);
//! let summary = CartSummary::build(&store.read(), &catalog.read(), Currency::MXN);
//! assert_eq!(summary.item_count, 2);
//! assert_eq!(summary.lines[0].name, "Producto #7");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod account;
pub mod booking;
pub mod cart;
pub mod catalog;
pub mod contact;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money, MoneyFormatter};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money, MoneyFormatter};

    // Catalog
    pub use crate::catalog::{
        CatalogCache, CatalogEntry, CatalogMap, Category, CategoryRef, NewProduct, Product,
    };

    // Cart
    pub use crate::cart::{
        Cart, CartEvent, CartItems, CartLine, CartStore, CartSummary, NotificationChannel,
        SubscriptionId,
    };

    // Booking and account
    pub use crate::account::{OrderSummary, UserProfile};
    pub use crate::booking::{
        BookingForm, Reservation, ReservationRequest, ReservationStatus, SpaService,
    };

    // Contact
    pub use crate::contact::{ContactField, ContactForm, ContactValidation, FieldCheck};
}
