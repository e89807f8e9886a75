//! # Persistent Store Adapter
//!
//! Durable round-trip of the whole product collection under one storage key.
//!
//! - [`ProductStore`]: the seam the session is written against.
//! - [`FileStore`]: one JSON file per key inside a storage directory.
//! - [`MemoryStore`]: shared in-memory blob for tests and embedding.
//!
//! Stores never keep a copy of the collection. They encode on [`ProductStore::save`]
//! and decode on [`ProductStore::load`], always the full collection.

mod codec;
pub mod error;
pub mod file;
pub mod memory;

pub use codec::{decode, encode};
pub use error::*;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::model::Product;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "products";

/// Result of reading the stored collection.
///
/// Loading never fails: an unreadable blob yields an empty collection together
/// with a [`CorruptStateWarning`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded {
    pub products: Vec<Product>,
    pub warning: Option<CorruptStateWarning>,
}

impl Loaded {
    pub fn fresh() -> Self {
        Self::default()
    }

    pub fn corrupt(key: &str, reason: impl Into<String>) -> Self {
        Self {
            products: Vec::new(),
            warning: Some(CorruptStateWarning {
                key: key.to_string(),
                reason: reason.into(),
            }),
        }
    }
}

/// Full-overwrite persistence for the product collection.
pub trait ProductStore {
    /// Reads the stored collection, degrading to empty when absent or unreadable.
    fn load(&self) -> Loaded;

    /// Replaces whatever is stored under the key with `products`.
    fn save(&mut self, products: &[Product]) -> Result<(), StoreError>;
}
