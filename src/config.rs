//! Runtime configuration, read from the process environment.

use std::env;
use std::path::PathBuf;

use crate::store::DEFAULT_STORAGE_KEY;

pub const DEFAULT_STORAGE_DIR: &str = ".catalog";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding the key-value blobs.
    pub storage_dir: PathBuf,
    /// Key the collection is stored under.
    pub storage_key: String,
    /// Bound of the session actor's request channel.
    pub channel_capacity: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl CatalogConfig {
    /// Reads `CATALOG_STORAGE_DIR`, `CATALOG_STORAGE_KEY` and
    /// `CATALOG_CHANNEL_CAPACITY`, keeping defaults for anything unset or invalid.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let storage_dir = lookup("CATALOG_STORAGE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);
        let storage_key = lookup("CATALOG_STORAGE_KEY")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.storage_key);
        let channel_capacity = lookup("CATALOG_CHANNEL_CAPACITY")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.channel_capacity);

        Self {
            storage_dir,
            storage_key,
            channel_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> CatalogConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CatalogConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), CatalogConfig::default());
        assert_eq!(CatalogConfig::default().storage_key, "products");
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("CATALOG_STORAGE_DIR", "/tmp/shop"),
            ("CATALOG_STORAGE_KEY", "inventory"),
            ("CATALOG_CHANNEL_CAPACITY", "4"),
        ]);
        assert_eq!(cfg.storage_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(cfg.storage_key, "inventory");
        assert_eq!(cfg.channel_capacity, 4);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = config(&[("CATALOG_STORAGE_KEY", " "), ("CATALOG_CHANNEL_CAPACITY", "0")]);
        assert_eq!(cfg.storage_key, "products");
        assert_eq!(cfg.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
    }
}
