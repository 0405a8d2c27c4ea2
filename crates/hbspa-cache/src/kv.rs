//! Typed key-value access with automatic serialization.

use std::sync::Arc;

use crate::{CacheError, Store};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe handle over a [`Store`].
///
/// Values are stored as JSON text. Cloning the handle shares the underlying
/// store, so every clone sees every other clone's writes.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn Store>,
}

impl Cache {
    /// Wrap a store.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hbspa_cache::{Cache, MemoryStore};
    /// let cache = Cache::new(MemoryStore::new());
    /// ```
    pub fn new(store: impl Store + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and an error if the stored
    /// text is not valid JSON for `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Get the raw stored text, without parsing.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Store raw text, without serializing.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.store.set(key, value)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
        qty: u32,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::new(MemoryStore::new());
        let item = Item {
            name: "Facial".to_string(),
            qty: 2,
        };
        cache.set("item", &item).unwrap();
        assert_eq!(cache.get::<Item>("item").unwrap(), Some(item));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::new(MemoryStore::new());
        assert_eq!(cache.get::<Item>("nope").unwrap(), None);
    }

    #[test]
    fn test_malformed_value_is_error() {
        let cache = Cache::new(MemoryStore::with_entries([("item", "not-json")]));
        let err = cache.get::<Item>("item").unwrap_err();
        assert!(matches!(err, CacheError::SerializeError(_)));
    }

    #[test]
    fn test_clones_share_store() {
        let cache = Cache::new(MemoryStore::new());
        let other = cache.clone();
        cache.set_raw("token", "abc").unwrap();
        assert_eq!(other.get_raw("token").unwrap().as_deref(), Some("abc"));
    }
}
