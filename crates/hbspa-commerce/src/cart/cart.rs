//! The persisted cart: a product-id to quantity mapping.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Maximum quantity allowed per product.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// Product id to quantity. Every stored quantity is positive.
pub type CartItems = BTreeMap<ProductId, u32>;

/// A shopper's cart as persisted under the cart storage key.
///
/// Serialized as `{"items": {"7": 2}, "updatedAt": 1700000000000}`.
/// Deserialization is lenient: a missing or non-object `items` is empty,
/// quantities go through [`coerce_quantity`] and non-positive ones are
/// dropped, and a non-numeric `updatedAt` is 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawCart")]
pub struct Cart {
    /// Quantities keyed by product.
    pub items: CartItems,
    /// Epoch milliseconds of the last write.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart that has never been written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from an item mapping.
    pub fn with_items(items: CartItems) -> Self {
        Self {
            items,
            updated_at: 0,
        }
    }

    /// Quantity held for a product, 0 if absent.
    pub fn quantity(&self, product_id: &ProductId) -> u32 {
        self.items.get(product_id).copied().unwrap_or(0)
    }

    /// Add `delta` (possibly negative) to a product's quantity.
    ///
    /// The result is clamped to `0..=MAX_QUANTITY_PER_ITEM`; reaching 0
    /// removes the key. Returns the new quantity.
    pub fn add(&mut self, product_id: &ProductId, delta: i64) -> u32 {
        let current = i64::from(self.quantity(product_id));
        let target = current.saturating_add(delta);
        let clamped = target.clamp(0, i64::from(MAX_QUANTITY_PER_ITEM));
        if target > clamped {
            tracing::warn!(
                product_id = %product_id,
                requested = target,
                "quantity capped at {}",
                MAX_QUANTITY_PER_ITEM
            );
        }

        // `clamped` is within u32 range by construction.
        let quantity = clamped as u32;
        if quantity == 0 {
            self.items.remove(product_id);
        } else {
            self.items.insert(product_id.clone(), quantity);
        }
        quantity
    }

    /// Remove a product entirely.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        self.items.remove(product_id).is_some()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.values().map(|&q| u64::from(q)).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Wire shape accepted when reading a persisted cart.
#[derive(Deserialize)]
struct RawCart {
    #[serde(default)]
    items: Option<Value>,
    #[serde(default, rename = "updatedAt")]
    updated_at: Option<Value>,
}

impl From<RawCart> for Cart {
    fn from(raw: RawCart) -> Self {
        Cart {
            items: match raw.items {
                Some(value) => normalize_items(&value),
                None => CartItems::new(),
            },
            updated_at: raw
                .updated_at
                .as_ref()
                .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
                .unwrap_or(0),
        }
    }
}

/// Turn an arbitrary JSON value into a clean item mapping.
///
/// Anything but an object is empty; entries whose quantity coerces to 0 are
/// dropped.
pub fn normalize_items(value: &Value) -> CartItems {
    let Some(object) = value.as_object() else {
        return CartItems::new();
    };
    object
        .iter()
        .filter_map(|(id, qty)| {
            let qty = coerce_quantity(qty);
            (qty > 0).then(|| (ProductId::new(id.as_str()), qty))
        })
        .collect()
}

/// Numeric coercion applied to stored quantities before arithmetic.
///
/// Numbers are truncated toward zero, numeric strings are parsed the same
/// way, `true` is 1, and everything else (including negatives and NaN) is 0.
/// Results above [`MAX_QUANTITY_PER_ITEM`] are capped.
pub fn coerce_quantity(value: &Value) -> u32 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        Value::Bool(true) => Some(1.0),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n >= 1.0 => {
            n.trunc().min(f64::from(MAX_QUANTITY_PER_ITEM)) as u32
        }
        _ => 0,
    }
}
