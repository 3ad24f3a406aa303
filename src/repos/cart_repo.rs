use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use crate::error::AppResult;
use crate::models::{Cart, CartItem};
use crate::repos::parse_id;

const CART_COLLECTION: &str = "carts";

/// Read/write access to cart documents.
///
/// Every mutation here is a single-document, single-field-path update; the
/// store's per-document atomicity is the only concurrency control. Positional
/// updates match the line item by `product_id`.
#[derive(Clone)]
pub struct CartRepo {
    coll: Collection<Cart>,
}

impl CartRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection(CART_COLLECTION),
        }
    }

    pub async fn insert(&self, items: Vec<CartItem>) -> AppResult<Cart> {
        let cart = Cart {
            id: ObjectId::new(),
            items,
        };
        let result = self.coll.insert_one(&cart).await?;
        let stored = self.coll.find_one(doc! { "_id": result.inserted_id }).await?;
        Ok(stored.unwrap_or(cart))
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Cart>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let cart = self.coll.find_one(doc! { "_id": oid }).await?;
        Ok(cart)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Cart>> {
        let cursor = self.coll.find(doc! {}).await?;
        let carts = cursor.try_collect().await?;
        Ok(carts)
    }

    /// Atomically add `delta` to the quantity of the line item matching
    /// `product_id`. Returns the modified count: 0 means no such line item
    /// (or no such cart).
    pub async fn inc_item_quantity(
        &self,
        cart_id: &str,
        product_id: &str,
        delta: i64,
    ) -> AppResult<u64> {
        let Some(oid) = parse_id(cart_id) else {
            return Ok(0);
        };
        let result = self
            .coll
            .update_one(
                doc! { "_id": oid, "items.product_id": product_id },
                doc! { "$inc": { "items.$.quantity": delta } },
            )
            .await?;
        Ok(result.modified_count)
    }

    /// Set the quantity of the line item matching `product_id`. Returns the
    /// matched count so callers can tell "no such cart/item" (0) apart from
    /// "matched but value unchanged".
    pub async fn set_item_quantity(
        &self,
        cart_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> AppResult<u64> {
        let Some(oid) = parse_id(cart_id) else {
            return Ok(0);
        };
        let result = self
            .coll
            .update_one(
                doc! { "_id": oid, "items.product_id": product_id },
                doc! { "$set": { "items.$.quantity": quantity } },
            )
            .await?;
        Ok(result.matched_count)
    }

    pub async fn push_item(&self, cart_id: &str, item: &CartItem) -> AppResult<u64> {
        let Some(oid) = parse_id(cart_id) else {
            return Ok(0);
        };
        let result = self
            .coll
            .update_one(
                doc! { "_id": oid },
                doc! { "$push": { "items": {
                    "product_id": item.product_id.as_str(),
                    "quantity": item.quantity,
                } } },
            )
            .await?;
        Ok(result.modified_count)
    }

    /// Remove the line item matching `product_id`. Pulling an absent item
    /// matches the cart but modifies nothing, which is exactly the silent
    /// no-op the remove operation wants.
    pub async fn pull_item(&self, cart_id: &str, product_id: &str) -> AppResult<u64> {
        let Some(oid) = parse_id(cart_id) else {
            return Ok(0);
        };
        let result = self
            .coll
            .update_one(
                doc! { "_id": oid },
                doc! { "$pull": { "items": { "product_id": product_id } } },
            )
            .await?;
        Ok(result.matched_count)
    }

    pub async fn clear_items(&self, cart_id: &str) -> AppResult<u64> {
        let Some(oid) = parse_id(cart_id) else {
            return Ok(0);
        };
        let result = self
            .coll
            .update_one(doc! { "_id": oid }, doc! { "$set": { "items": [] } })
            .await?;
        Ok(result.matched_count)
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };
        let result = self.coll.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count == 1)
    }
}
