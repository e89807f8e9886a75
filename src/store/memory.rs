//! # In-Memory Store
//!
//! A [`ProductStore`] whose blob lives in memory behind a shared handle.
//!
//! Clones share the same storage, so a test can hand one clone to the session
//! and keep another to seed content, inspect the last write, or make the next
//! writes fail.
//!
//! ```ignore
//! let store = MemoryStore::new();
//! let mut session = ProductSession::open(store.clone());
//! store.fail_next_saves(1, "quota exceeded");
//! // ... the next mutating command reports a write failure ...
//! assert_eq!(store.blob().as_deref(), Some("[]"));
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use super::{decode, encode, Loaded, ProductStore, StoreError, DEFAULT_STORAGE_KEY};
use crate::model::Product;

#[derive(Debug, Default)]
struct Slot {
    blob: Option<String>,
    saves: usize,
    failures: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
    key: String,
    slot: Arc<Mutex<Slot>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store (no value under the key).
    pub fn new() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Creates a store whose key already holds `blob`, valid or not.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let store = Self::new();
        store.lock().blob = Some(blob.into());
        store
    }

    /// Creates a store already holding `products`.
    pub fn with_products(products: &[Product]) -> Result<Self, StoreError> {
        Ok(Self::with_blob(encode(products)?))
    }

    /// The raw blob currently stored, if any.
    pub fn blob(&self) -> Option<String> {
        self.lock().blob.clone()
    }

    /// Number of successful writes so far.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Makes the next `count` writes fail with `reason`.
    pub fn fail_next_saves(&self, count: usize, reason: &str) {
        let mut slot = self.lock();
        slot.failures.extend(std::iter::repeat(reason.to_string()).take(count));
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ProductStore for MemoryStore {
    fn load(&self) -> Loaded {
        let slot = self.lock();
        match slot.blob.as_deref() {
            None => Loaded::fresh(),
            Some(blob) => match decode(blob) {
                Ok(products) => Loaded {
                    products,
                    warning: None,
                },
                Err(e) => Loaded::corrupt(&self.key, e.to_string()),
            },
        }
    }

    fn save(&mut self, products: &[Product]) -> Result<(), StoreError> {
        let mut slot = self.lock();
        if !slot.failures.is_empty() {
            let reason = slot.failures.remove(0);
            return Err(StoreError::Rejected(reason));
        }
        slot.blob = Some(encode(products)?);
        slot.saves += 1;
        Ok(())
    }
}
