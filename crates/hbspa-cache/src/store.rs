//! Raw string key-value stores.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::CacheError;

/// A flat string key-value store.
///
/// Every call is synchronous and atomic with respect to other calls on the
/// same instance. Nothing coordinates separate instances pointing at the same
/// backing data: the last write wins.
pub trait Store: Send + Sync {
    /// Get the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List every key in the store.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, CacheError> {
    mutex
        .lock()
        .map_err(|_| CacheError::StoreError("store lock poisoned".to_string()))
}

/// In-memory store, optionally capped at a byte quota.
///
/// The quota counts key and value bytes, like a browser storage area.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes beyond `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Seed the store with existing entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            quota: None,
        }
    }

    fn used_bytes(entries: &HashMap<String, String>, skip: &str) -> usize {
        entries
            .iter()
            .filter(|(k, _)| k.as_str() != skip)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = lock(&self.entries)?;
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(Self::used_bytes(&entries, key));
            let needed = key.len() + value.len();
            if needed > available {
                return Err(CacheError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys: Vec<String> = lock(&self.entries)?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Store persisted as a single JSON object on disk.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves a half-written file behind.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) a store at `path`.
    ///
    /// Parent directories are created on open.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CacheError::OpenError(format!("{}: {}", parent.display(), e))
                })?;
            }
        }
        Ok(Self {
            path,
            guard: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing file.
    ///
    /// An unparseable file reads as empty and the next write replaces it.
    /// Non-string values are kept in their JSON text form.
    fn load(&self) -> Result<BTreeMap<String, String>, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let object: Map<String, Value> = match serde_json::from_str(&content) {
            Ok(object) => object,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable store file, starting empty");
                return Ok(BTreeMap::new());
            }
        };
        Ok(object
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect())
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let _guard = lock(&self.guard)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let _guard = lock(&self.guard)?;
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let _guard = lock(&self.guard)?;
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let _guard = lock(&self.guard)?;
        Ok(self.load()?.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn test_memory_store_set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert!(store.exists("a").unwrap());

        store.delete("a").unwrap();
        assert!(!store.exists("a").unwrap());
    }

    #[test]
    fn test_memory_store_quota_rejects_and_keeps_old_value() {
        let store = MemoryStore::with_quota(10);
        store.set("k", "small").unwrap();

        let err = store.set("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, CacheError::QuotaExceeded { .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_memory_store_quota_ignores_replaced_value() {
        // 1 + 9 bytes fits exactly; replacing must not double count the old value.
        let store = MemoryStore::with_quota(10);
        store.set("k", "123456789").unwrap();
        store.set("k", "987654321").unwrap();
    }

    #[test]
    fn test_memory_store_keys_sorted() {
        let store = MemoryStore::with_entries([("b", "2"), ("a", "1")]);
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let store = FileStore::open(&path).unwrap();
        store.set("hbspa_cart", r#"{"items":{}}"#).unwrap();
        store.set("token", "abc").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.keys().unwrap(), vec!["hbspa_cart", "token"]);

        reopened.delete("token").unwrap();
        assert_eq!(reopened.get("token").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested/storage.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_keeps_non_string_values_as_json_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"hbspa_cart": {"items": {"7": 1}}, "token": "abc"}"#).unwrap();

        let store = FileStore::open(&path).unwrap();
        let cart: Value = serde_json::from_str(&store.get("hbspa_cart").unwrap().unwrap()).unwrap();
        assert_eq!(cart, serde_json::json!({"items": {"7": 1}}));

        store.set("token", "xyz").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("xyz"));
    }

    #[test]
    fn test_file_store_corrupt_file_is_replaced_on_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("token").unwrap(), None);

        store.set("token", "abc").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.keys().unwrap(), vec!["token"]);
    }
}
