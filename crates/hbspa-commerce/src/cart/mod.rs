//! Shopping cart module.
//!
//! Contains the persisted cart, the store that mutates it, the change
//! notification channel and display summaries.

mod cart;
mod channel;
mod store;
mod summary;

pub use cart::{coerce_quantity, normalize_items, Cart, CartItems, MAX_QUANTITY_PER_ITEM};
pub use channel::{CartEvent, NotificationChannel, SubscriptionId};
pub use store::{CartStore, CART_STORAGE_KEY};
pub use summary::{placeholder_name, CartLine, CartSummary, PLACEHOLDER_IMAGE_URL};
