use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Catalog document, collection `products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub in_stock: i64,
}

/// Cart document, collection `carts`. Holds raw line items only; the priced
/// view (names, unit prices, totals) is recomputed from the catalog on every
/// read and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub items: Vec<CartItem>,
}

/// A single (product reference, quantity) pair inside a cart. At most one per
/// product_id in any cart; repeated additions merge by summing quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: i64,
}
