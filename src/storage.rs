//! Persistence adapter
//!
//! The product collection is stored as one JSON array under a single key and
//! replaced wholesale on every save. Backends only need string get/set/remove:
//!
//! - [`MemoryStore`]: in-process map
//! - [`FileStore`]: one JSON file per key in a data directory
//! - `BrowserStorage` (wasm32, see `web`): `window.localStorage`

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::types::Product;

/// String key-value backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// PRODUCT STORE
// =============================================================================

/// Reads and writes the product collection under a fixed key.
pub struct ProductStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> ProductStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Serialize the full collection and overwrite the stored value.
    pub fn save(&mut self, products: &[Product]) -> Result<(), StorageError> {
        let json = serde_json::to_string(products)?;
        self.backend.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = products.len(), "Saved product collection");
        Ok(())
    }

    /// Read the stored collection.
    ///
    /// A missing key, a failing backend or a value that is not a product array
    /// all yield `None` so the caller falls back to the seed resource.
    pub fn load(&self) -> Option<Vec<Product>> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored product collection");
                return None;
            }
            Err(e) => {
                tracing::debug!(key = %self.key, "Storage read failed: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<Product>>(&raw) {
            Ok(products) => Some(products),
            Err(e) => {
                tracing::debug!(key = %self.key, "Stored value is not a product list: {}", e);
                None
            }
        }
    }

    /// Drop the stored collection so the next startup re-seeds.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.backend.remove(&self.key)
    }
}

// =============================================================================
// MEMORY BACKEND
// =============================================================================

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.data.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE BACKEND
// =============================================================================

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |e: std::io::Error| StorageError::Write {
            key: key.to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "demo_products_v1";

    fn sample() -> Vec<Product> {
        vec![
            Product::new("1", "Lamp", "Desk lamp", 25.0, "lamp.png"),
            Product::new("2", "Chair", "Oak chair", 120.5, "chair.png"),
        ]
    }

    /// Backend whose reads and writes always fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                message: "denied".to_string(),
            })
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            })
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_load_missing_is_absent() {
        let store = ProductStore::new(MemoryStore::new(), KEY);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = ProductStore::new(MemoryStore::new(), KEY);
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
    }

    #[test]
    fn test_save_writes_json_array_under_key() {
        let mut store = ProductStore::new(MemoryStore::new(), KEY);
        store.save(&sample()[..1]).unwrap();
        let raw = store.backend().get(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], "1");
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_value_is_absent() {
        let mut backend = MemoryStore::new();
        backend.set(KEY, "{not json").unwrap();
        let store = ProductStore::new(backend, KEY);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_wrong_shape_is_absent() {
        let mut backend = MemoryStore::new();
        backend.set(KEY, r#"{"products": []}"#).unwrap();
        let store = ProductStore::new(backend, KEY);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_empty_array_is_present() {
        let mut backend = MemoryStore::new();
        backend.set(KEY, "[]").unwrap();
        let store = ProductStore::new(backend, KEY);
        assert_eq!(store.load(), Some(Vec::new()));
    }

    #[test]
    fn test_broken_backend() {
        let mut store = ProductStore::new(BrokenStore, KEY);
        assert!(store.load().is_none());
        assert!(matches!(
            store.save(&sample()),
            Err(StorageError::Write { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut store = ProductStore::new(MemoryStore::new(), KEY);
        store.save(&sample()).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProductStore::new(FileStore::new(dir.path().join("data")), KEY);
        assert!(store.load().is_none());

        store.save(&sample()).unwrap();
        assert!(dir.path().join("data").join("demo_products_v1.json").exists());
        assert_eq!(store.load(), Some(sample()));

        store.clear().unwrap();
        assert!(store.load().is_none());
        // removing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_sanitizes_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileStore::new(dir.path());
        backend.set("../escape/key", "[]").unwrap();
        assert!(dir.path().join(".._escape_key.json").exists());
        assert_eq!(backend.get("../escape/key").unwrap().as_deref(), Some("[]"));
    }
}
