//! Local snapshot of product display metadata.

use crate::catalog::Product;
use crate::ids::ProductId;
use hbspa_cache::Cache;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Storage key of the catalog snapshot.
pub const PRODUCTS_STORAGE_KEY: &str = "hbspa_products";

/// Display metadata for one product.
///
/// Stored as `{id, name, price, imageUrl}`. Every field is optional on read
/// and a field of the wrong type reads as absent, so a hand-edited or older
/// snapshot still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<ProductId>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
}

impl From<&Product> for CatalogEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            name: Some(product.name.clone()),
            price: Some(product.price),
            image_url: product.image_url.clone(),
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Accept numbers and numeric strings; anything else means "no price".
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
        _ => None,
    })
}

/// Product id to display metadata.
pub type CatalogMap = BTreeMap<ProductId, CatalogEntry>;

/// Reader/writer for the catalog snapshot.
///
/// The snapshot is replaced wholesale whenever the full catalog is fetched.
/// Readers never fail: a missing or unreadable snapshot is empty.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    cache: Cache,
}

impl CatalogCache {
    /// Create a catalog cache over shared storage.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Read the whole snapshot.
    ///
    /// Entries that are not objects are skipped one by one; the rest load.
    pub fn read(&self) -> CatalogMap {
        match self.cache.get::<BTreeMap<String, Value>>(PRODUCTS_STORAGE_KEY) {
            Ok(Some(raw)) => raw
                .into_iter()
                .filter_map(|(id, value)| match serde_json::from_value::<CatalogEntry>(value) {
                    Ok(entry) => Some((ProductId::new(id), entry)),
                    Err(e) => {
                        tracing::warn!(product_id = %id, error = %e, "skipping unreadable catalog entry");
                        None
                    }
                })
                .collect(),
            Ok(None) => CatalogMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable catalog snapshot, treating as empty");
                CatalogMap::new()
            }
        }
    }

    /// Look up one product.
    pub fn lookup(&self, product_id: &ProductId) -> Option<CatalogEntry> {
        self.read().remove(product_id)
    }

    /// Replace the snapshot with `products`. Returns the entry count.
    ///
    /// Write failures are logged and swallowed; the previous snapshot stays.
    pub fn rebuild(&self, products: &[Product]) -> usize {
        let map: CatalogMap = products
            .iter()
            .map(|p| (p.id.clone(), CatalogEntry::from(p)))
            .collect();

        if let Err(e) = self.cache.set(PRODUCTS_STORAGE_KEY, &map) {
            tracing::warn!(error = %e, "failed to store catalog snapshot");
        }
        map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbspa_cache::MemoryStore;

    fn product(id: &str, name: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            description: None,
            stock: 1,
            contenido: None,
            image_url: Some(format!("https://img.example/{id}.jpg")),
            category: None,
        }
    }

    #[test]
    fn test_rebuild_and_lookup() {
        let catalog = CatalogCache::new(Cache::new(MemoryStore::new()));
        assert_eq!(catalog.rebuild(&[product("7", "Facial", 50.0)]), 1);

        let entry = catalog.lookup(&ProductId::new("7")).unwrap();
        assert_eq!(entry.name.as_deref(), Some("Facial"));
        assert_eq!(entry.price, Some(50.0));
    }

    #[test]
    fn test_rebuild_replaces_wholesale() {
        let catalog = CatalogCache::new(Cache::new(MemoryStore::new()));
        catalog.rebuild(&[product("1", "A", 1.0), product("2", "B", 2.0)]);
        catalog.rebuild(&[product("2", "B2", 3.0)]);

        let map = catalog.read();
        assert_eq!(map.len(), 1);
        assert_eq!(map[&ProductId::new("2")].name.as_deref(), Some("B2"));
    }

    #[test]
    fn test_stored_shape() {
        let cache = Cache::new(MemoryStore::new());
        CatalogCache::new(cache.clone()).rebuild(&[product("7", "Facial", 50.0)]);

        let raw: Value = cache.get(PRODUCTS_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            serde_json::json!({"7": {"id": 7, "name": "Facial", "price": 50.0,
                                      "imageUrl": "https://img.example/7.jpg"}})
        );
    }

    #[test]
    fn test_partial_entries_load() {
        let cache = Cache::new(MemoryStore::with_entries([(
            PRODUCTS_STORAGE_KEY,
            r#"{"7": {"name": "Facial", "price": 50}, "8": {"price": "abc"}}"#,
        )]));
        let map = CatalogCache::new(cache).read();

        assert_eq!(map[&ProductId::new("7")].price, Some(50.0));
        assert_eq!(map[&ProductId::new("8")].price, None);
        assert_eq!(map[&ProductId::new("8")].name, None);
    }

    #[test]
    fn test_bad_entry_does_not_hide_the_others() {
        let cache = Cache::new(MemoryStore::with_entries([(
            PRODUCTS_STORAGE_KEY,
            r#"{"7": {"id": 7, "name": "Facial", "price": 50},
                "8": {"id": 8.5, "name": ["x"], "imageUrl": 3},
                "9": "garbage"}"#,
        )]));
        let map = CatalogCache::new(cache).read();

        assert_eq!(map.len(), 2);
        assert_eq!(map[&ProductId::new("7")].name.as_deref(), Some("Facial"));
        assert_eq!(map[&ProductId::new("7")].price, Some(50.0));
        let odd = &map[&ProductId::new("8")];
        assert_eq!(odd.id, None);
        assert_eq!(odd.name, None);
        assert_eq!(odd.image_url, None);
    }

    #[test]
    fn test_malformed_snapshot_is_empty() {
        let cache = Cache::new(MemoryStore::with_entries([(PRODUCTS_STORAGE_KEY, "not-json")]));
        assert!(CatalogCache::new(cache).read().is_empty());
    }

    #[test]
    fn test_failed_write_keeps_previous_snapshot() {
        let cache = Cache::new(MemoryStore::with_quota(120));
        let catalog = CatalogCache::new(cache);
        catalog.rebuild(&[product("1", "A", 1.0)]);

        let many: Vec<Product> = (0..50).map(|i| product(&i.to_string(), "Long name", 9.0)).collect();
        catalog.rebuild(&many);

        assert_eq!(catalog.read().len(), 1);
    }
}
