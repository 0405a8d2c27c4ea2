//! Persistence and mutation of the shopper's cart.

use crate::cart::{Cart, CartEvent, CartItems, NotificationChannel};
use crate::error::CommerceError;
use crate::ids::ProductId;
use hbspa_cache::Cache;

/// Storage key of the persisted cart.
pub const CART_STORAGE_KEY: &str = "hbspa_cart";

/// The single writer of the persisted cart.
///
/// Every mutation reads the stored cart, applies the change, writes it back
/// and announces the full resulting mapping on the [`NotificationChannel`].
/// Storage failures never surface to callers: the in-memory result is still
/// announced and the previously persisted state stays in place.
///
/// ```
/// use hbspa_cache::{Cache, MemoryStore};
/// use hbspa_commerce::cart::{CartStore, NotificationChannel};
/// use hbspa_commerce::ProductId;
///
/// let store = CartStore::new(Cache::new(MemoryStore::new()), NotificationChannel::new());
/// store.increment(&ProductId::new("7"), 1);
/// assert_eq!(store.read().quantity(&ProductId::new("7")), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CartStore {
    cache: Cache,
    channel: NotificationChannel,
}

impl CartStore {
    /// Create a store over shared storage, announcing on `channel`.
    pub fn new(cache: Cache, channel: NotificationChannel) -> Self {
        Self { cache, channel }
    }

    /// The channel this store announces on.
    pub fn channel(&self) -> &NotificationChannel {
        &self.channel
    }

    /// Read the persisted cart. Missing or malformed data is an empty cart.
    pub fn read(&self) -> Cart {
        match self.cache.get::<Cart>(CART_STORAGE_KEY) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable cart, starting empty");
                Cart::new()
            }
        }
    }

    /// Persist `cart`, stamping `updatedAt`.
    ///
    /// The stamp never goes backwards relative to the cart being written.
    pub fn try_write(&self, cart: &Cart) -> Result<Cart, CommerceError> {
        let stamped = Cart {
            items: cart.items.clone(),
            updated_at: now_millis().max(cart.updated_at),
        };
        self.cache.set(CART_STORAGE_KEY, &stamped)?;
        Ok(stamped)
    }

    /// Persist `cart`, logging and swallowing failures. Returns whether the
    /// write landed.
    pub fn write(&self, cart: &Cart) -> bool {
        match self.try_write(cart) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist cart");
                false
            }
        }
    }

    /// Add `delta` to a product's quantity, then persist and announce.
    pub fn increment(&self, product_id: &ProductId, delta: i64) -> Cart {
        let mut cart = self.read();
        cart.add(product_id, delta);
        self.commit(cart)
    }

    /// Take one unit of a product away.
    pub fn decrement(&self, product_id: &ProductId) -> Cart {
        self.increment(product_id, -1)
    }

    /// Drop a product from the cart.
    pub fn remove(&self, product_id: &ProductId) -> Cart {
        let mut cart = self.read();
        cart.remove(product_id);
        self.commit(cart)
    }

    /// Empty the cart.
    pub fn clear(&self) -> Cart {
        let mut cart = self.read();
        cart.clear();
        self.commit(cart)
    }

    /// Replace the whole item mapping without announcing it.
    ///
    /// Non-positive quantities are dropped and the rest capped, matching
    /// what a read would produce.
    pub fn set_all(&self, items: CartItems) -> Cart {
        let mut cart = self.read();
        cart.items = items
            .into_iter()
            .filter(|(_, qty)| *qty > 0)
            .map(|(id, qty)| (id, qty.min(super::MAX_QUANTITY_PER_ITEM)))
            .collect();
        self.write(&cart);
        cart
    }

    /// Apply an event produced elsewhere, then announce the full mapping.
    pub fn apply(&self, event: &CartEvent) -> Cart {
        let cart = match event {
            CartEvent::Replaced { items } => self.set_all(items.clone()),
            CartEvent::Delta { product_id, qty } => {
                let mut cart = self.read();
                cart.add(product_id, *qty);
                self.write(&cart);
                cart
            }
        };
        self.announce(&cart);
        cart
    }

    fn commit(&self, cart: Cart) -> Cart {
        self.write(&cart);
        self.announce(&cart);
        cart
    }

    fn announce(&self, cart: &Cart) {
        self.channel.publish(&CartEvent::Replaced {
            items: cart.items.clone(),
        });
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbspa_cache::MemoryStore;
    use std::sync::{Arc, Mutex};

    fn store() -> CartStore {
        CartStore::new(Cache::new(MemoryStore::new()), NotificationChannel::new())
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_increment_then_decrement_removes_key() {
        let store = store();
        assert_eq!(store.increment(&id("7"), 1).quantity(&id("7")), 1);
        assert_eq!(store.increment(&id("7"), 1).quantity(&id("7")), 2);

        store.decrement(&id("7"));
        let cart = store.decrement(&id("7"));
        assert!(!cart.items.contains_key(&id("7")));
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_malformed_value_reads_empty() {
        let cache = Cache::new(MemoryStore::with_entries([(CART_STORAGE_KEY, "not-json")]));
        let store = CartStore::new(cache, NotificationChannel::new());
        assert_eq!(store.read(), Cart::new());
    }

    #[test]
    fn test_write_stamps_non_decreasing() {
        let store = store();
        let mut cart = Cart::new();
        cart.add(&id("1"), 3);

        let first = store.try_write(&cart).unwrap();
        let read_back = store.read();
        assert_eq!(read_back.items, cart.items);
        assert!(read_back.updated_at >= cart.updated_at);

        let second = store.try_write(&read_back).unwrap();
        assert!(second.updated_at >= first.updated_at);
    }

    #[test]
    fn test_future_stamp_is_kept() {
        let store = store();
        let mut cart = Cart::new();
        cart.updated_at = i64::MAX / 2;
        assert_eq!(store.try_write(&cart).unwrap().updated_at, i64::MAX / 2);
    }

    #[test]
    fn test_mutations_announce_full_mapping() {
        let store = store();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.channel().subscribe(move |e| sink.lock().unwrap().push(e.clone()));

        store.increment(&id("7"), 2);
        store.increment(&id("8"), 1);
        store.remove(&id("7"));
        store.clear();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 4);
        match &events[1] {
            CartEvent::Replaced { items } => assert_eq!(items.len(), 2),
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(
            events[3],
            CartEvent::Replaced {
                items: CartItems::new()
            }
        );
    }

    #[test]
    fn test_set_all_does_not_announce() {
        let store = store();
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);
        store.channel().subscribe(move |_| *counter.lock().unwrap() += 1);

        let mut items = CartItems::new();
        items.insert(id("1"), 4);
        items.insert(id("2"), 0);
        let cart = store.set_all(items);

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(store.read().quantity(&id("1")), 4);
        assert_eq!(*hits.lock().unwrap(), 0);
    }

    #[test]
    fn test_apply_delta_counts_once() {
        let store = store();
        store.increment(&id("5"), 1);

        let cart = store.apply(&CartEvent::Delta {
            product_id: id("5"),
            qty: 1,
        });
        assert_eq!(cart.quantity(&id("5")), 2);
        assert_eq!(store.read().quantity(&id("5")), 2);
    }

    #[test]
    fn test_failed_write_still_announces() {
        let cache = Cache::new(MemoryStore::with_quota(4));
        let store = CartStore::new(cache, NotificationChannel::new());
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        store.channel().subscribe(move |e| *sink.lock().unwrap() = Some(e.clone()));

        let cart = store.increment(&id("9"), 1);
        assert_eq!(cart.quantity(&id("9")), 1);
        assert!(store.read().is_empty());
        assert!(seen.lock().unwrap().is_some());
    }

    #[test]
    fn test_subscriber_may_mutate_store() {
        let store = store();
        let inner = store.clone();
        store.channel().subscribe(move |event| {
            if let CartEvent::Replaced { items } = event {
                if items.len() == 1 && items.contains_key(&ProductId::new("1")) {
                    inner.increment(&ProductId::new("2"), 1);
                }
            }
        });

        store.increment(&id("1"), 1);
        let cart = store.read();
        assert_eq!(cart.quantity(&id("1")), 1);
        assert_eq!(cart.quantity(&id("2")), 1);
    }
}
