//! Cart lines decorated with catalog metadata.

use crate::cart::Cart;
use crate::catalog::{CatalogEntry, CatalogMap};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::Serialize;

/// Image shown for products missing from the catalog snapshot.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/112x112?text=%F0%9F%9B%92";

/// Name shown for a product missing from the catalog snapshot.
pub fn placeholder_name(product_id: &ProductId) -> String {
    format!("Producto #{}", product_id)
}

/// One cart line ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub image_url: String,
    /// `None` when the catalog has no usable price.
    pub unit_price: Option<Money>,
    pub quantity: u32,
    /// Zero when the unit price is unknown.
    pub line_total: Money,
    /// Whether the catalog snapshot had an entry for this product.
    pub known: bool,
}

impl CartLine {
    fn new(product_id: &ProductId, quantity: u32, entry: Option<&CatalogEntry>, currency: Currency) -> Self {
        let name = entry
            .and_then(|e| e.name.as_deref())
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_name(product_id));
        let image_url = entry
            .and_then(|e| e.image_url.as_deref())
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
            .to_string();
        let unit_price = entry
            .and_then(|e| e.price)
            .and_then(|p| Money::from_decimal(p, currency));
        let line_total = unit_price
            .and_then(|p| p.try_multiply(i64::from(quantity)))
            .unwrap_or_else(|| Money::zero(currency));

        Self {
            product_id: product_id.clone(),
            name,
            image_url,
            unit_price,
            quantity,
            line_total,
            known: entry.is_some(),
        }
    }
}

/// Totals and lines for a cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    /// Sum of quantities.
    pub item_count: u64,
    /// Distinct products.
    pub unique_count: usize,
    pub total: Money,
    /// Lines in product id order.
    pub lines: Vec<CartLine>,
}

impl CartSummary {
    /// Decorate `cart` with catalog metadata.
    ///
    /// Products missing from `catalog` get placeholder display values and
    /// contribute nothing to the total.
    pub fn build(cart: &Cart, catalog: &CatalogMap, currency: Currency) -> Self {
        let lines: Vec<CartLine> = cart
            .items
            .iter()
            .map(|(id, &qty)| CartLine::new(id, qty, catalog.get(id), currency))
            .collect();

        let total = match Money::try_sum(lines.iter().map(|l| &l.line_total), currency) {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!(error = %e, "cart total overflowed");
                Money::zero(currency)
            }
        };

        Self {
            item_count: cart.item_count(),
            unique_count: cart.unique_item_count(),
            total,
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog(value: serde_json::Value) -> CatalogMap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_total_from_catalog() {
        let mut cart = Cart::new();
        cart.add(&ProductId::new("7"), 2);
        let summary = CartSummary::build(
            &cart,
            &catalog(json!({"7": {"name": "Facial", "price": 50}})),
            Currency::MXN,
        );

        assert_eq!(summary.total, Money::new(10000, Currency::MXN));
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.lines[0].name, "Facial");
        assert_eq!(summary.lines[0].image_url, PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_missing_product_uses_placeholder() {
        let mut cart = Cart::new();
        cart.add(&ProductId::new("7"), 2);
        cart.add(&ProductId::new("42"), 3);
        let summary = CartSummary::build(
            &cart,
            &catalog(json!({"7": {"name": "Facial", "price": 50}})),
            Currency::MXN,
        );

        let missing = summary
            .lines
            .iter()
            .find(|l| l.product_id == ProductId::new("42"))
            .unwrap();
        assert!(!missing.known);
        assert_eq!(missing.name, "Producto #42");
        assert_eq!(missing.unit_price, None);
        assert!(missing.line_total.is_zero());
        assert_eq!(summary.total.amount_cents, 10000);
    }

    #[test]
    fn test_entry_without_price() {
        let mut cart = Cart::new();
        cart.add(&ProductId::new("1"), 1);
        let summary = CartSummary::build(
            &cart,
            &catalog(json!({"1": {"name": "Masaje"}})),
            Currency::MXN,
        );
        assert!(summary.lines[0].known);
        assert!(summary.total.is_zero());
    }
}
