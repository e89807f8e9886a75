use crate::model::Product;

use super::StoreError;

/// Serializes the collection as a compact JSON array.
pub fn encode(products: &[Product]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(products)?)
}

pub fn decode(blob: &str) -> Result<Vec<Product>, serde_json::Error> {
    serde_json::from_str(blob)
}
