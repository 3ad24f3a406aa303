use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Line item as accepted from callers and persisted inside a cart document.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CartItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCartRequest {
    #[serde(default)]
    pub items: Vec<CartItemRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// A line item priced against the catalog at read time. For a product that no
/// longer resolves, `product_name` carries the not-found marker and the unit
/// price and line total are zero.
#[derive(Debug, Serialize, ToSchema)]
pub struct PricedItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

/// Externally visible cart state. `total_amount` is recomputed from current
/// catalog prices on every read; no stored total is ever trusted.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub id: String,
    pub items: Vec<PricedItemResponse>,
    pub total_amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CartList {
    #[schema(value_type = Vec<CartResponse>)]
    pub items: Vec<CartResponse>,
}

/// Checkout result. Constructed and returned, never persisted; the cart itself
/// is deleted as checkout's side effect.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummaryResponse {
    pub cart_id: String,
    pub items: Vec<PricedItemResponse>,
    pub total_amount: f64,
    pub status: String,
}
