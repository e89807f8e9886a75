use serde::{Deserialize, Serialize};

/// Represents a product in the catalog.
///
/// This is the only persisted entity. The whole collection is stored as a JSON
/// array of these objects (see [`crate::store`]).
///
/// See [`ProductFields`] for the validated payload produced from a
/// [`Draft`](crate::model::Draft).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub stock: u32,
}

impl Product {
    /// Creates a new Product from an already minted id and validated fields.
    pub fn new(id: impl Into<String>, fields: ProductFields) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            price: fields.price,
            description: fields.description,
            stock: fields.stock,
        }
    }

    /// Replaces every field except `id`.
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.price = fields.price;
        self.description = fields.description;
        self.stock = fields.stock;
    }

    /// Price rendered with two decimals, e.g. `9.99` or `10.00`.
    pub fn display_price(&self) -> String {
        format!("{:.2}", self.price)
    }
}

/// Validated, typed product fields (everything but the id).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub stock: u32,
}
