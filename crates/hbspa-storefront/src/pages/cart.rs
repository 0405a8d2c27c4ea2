//! Add-to-cart from the product listing.

use crate::api::StorefrontApi;
use crate::region::SyncStatus;
use hbspa_commerce::cart::{Cart, CartStore};
use hbspa_commerce::ProductId;
use serde::Serialize;

pub const ADDED_TO_CART: &str = "Producto agregado al carrito 🛒";

/// Result of [`CartPage::add_to_cart`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddToCartOutcome {
    pub cart: Cart,
    pub sync: SyncStatus,
    pub message: &'static str,
}

#[derive(Debug, Clone)]
pub struct CartPage {
    api: StorefrontApi,
    store: CartStore,
}

impl CartPage {
    pub fn new(api: StorefrontApi, store: CartStore) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Add one unit locally, then tell the backend.
    ///
    /// The local increment is never rolled back.
    pub async fn add_to_cart(&self, product_id: &ProductId) -> AddToCartOutcome {
        let cart = self.store.increment(product_id, 1);

        let sync = match self.api.add_to_cart(product_id, 1).await {
            Ok(()) => SyncStatus::Synced,
            Err(e) => {
                tracing::warn!(product = %product_id, error = %e, "backend rejected add to cart");
                SyncStatus::LocalOnly {
                    reason: e.to_string(),
                }
            }
        };

        AddToCartOutcome {
            cart,
            sync,
            message: ADDED_TO_CART,
        }
    }
}
