//! File-backed key-value storage: `<dir>/<key>.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{decode, encode, Loaded, ProductStore, StoreError};
use crate::model::Product;

/// Stores the collection as a single JSON file named after the storage key.
///
/// Writes go to a sibling temp file that is then renamed over the target, so a
/// reader never sees a half-written blob.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Location of the blob for this store's key.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", self.key))
    }
}

impl ProductStore for FileStore {
    fn load(&self) -> Loaded {
        let path = self.path();
        let blob = match fs::read_to_string(&path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key = %self.key, path = %path.display(), "No stored catalog");
                return Loaded::fresh();
            }
            Err(e) => return Loaded::corrupt(&self.key, e.to_string()),
        };

        match decode(&blob) {
            Ok(products) => {
                debug!(key = %self.key, size = products.len(), "Loaded");
                Loaded {
                    products,
                    warning: None,
                }
            }
            Err(e) => Loaded::corrupt(&self.key, e.to_string()),
        }
    }

    fn save(&mut self, products: &[Product]) -> Result<(), StoreError> {
        let blob = encode(products)?;
        fs::create_dir_all(&self.dir)?;
        let temp = self.temp_path();
        fs::write(&temp, blob)?;
        if let Err(e) = fs::rename(&temp, self.path()) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        debug!(key = %self.key, size = products.len(), "Saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductFields;

    fn widget(id: &str) -> Product {
        Product::new(
            id,
            ProductFields {
                name: "Widget".into(),
                price: 9.99,
                description: "small".into(),
                stock: 5,
            },
        )
    }

    #[test]
    fn test_missing_file_is_fresh_install() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "products");
        assert_eq!(store.load(), Loaded::fresh());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"), "products");
        let products = vec![widget("1"), widget("2")];

        store.save(&products).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.products, products);
        assert!(loaded.warning.is_none());
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path(), "products");
        store.save(&[widget("1"), widget("2")]).unwrap();
        store.save(&[]).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
        assert!(store.load().products.is_empty());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "products");
        fs::write(store.path(), "{not json").unwrap();

        let loaded = store.load();
        assert!(loaded.products.is_empty());
        let warning = loaded.warning.expect("expected a corrupt-state warning");
        assert_eq!(warning.key, "products");
    }

    #[test]
    fn test_unreadable_path_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "products");
        fs::create_dir(store.path()).unwrap();

        let loaded = store.load();
        assert!(loaded.products.is_empty());
        assert_eq!(loaded.warning.map(|w| w.key), Some("products".to_string()));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path(), "products");
        fs::create_dir(store.path()).unwrap();

        let err = store.save(&[widget("1")]).unwrap_err();

        assert!(matches!(err, StoreError::Io(_)));
        assert!(!store.temp_path().exists());
        assert!(store.path().is_dir());
    }

    #[test]
    fn test_keys_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = FileStore::new(dir.path(), "a");
        let b = FileStore::new(dir.path(), "b");
        a.save(&[widget("1")]).unwrap();
        assert!(b.load().products.is_empty());
    }
}
