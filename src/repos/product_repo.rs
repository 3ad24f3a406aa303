use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use crate::error::AppResult;
use crate::models::Product;
use crate::repos::parse_id;

const PRODUCT_COLLECTION: &str = "products";

/// Read/write access to the product catalog.
#[derive(Clone)]
pub struct ProductRepo {
    coll: Collection<Product>,
}

impl ProductRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection(PRODUCT_COLLECTION),
        }
    }

    /// Insert a product and read it back, so the caller sees exactly what the
    /// store persisted.
    pub async fn insert(&self, product: Product) -> AppResult<Product> {
        let result = self.coll.insert_one(&product).await?;
        let filter = doc! { "_id": result.inserted_id };
        let stored = self.coll.find_one(filter).await?;
        Ok(stored.unwrap_or(product))
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let product = self.coll.find_one(doc! { "_id": oid }).await?;
        Ok(product)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Product>> {
        let cursor = self.coll.find(doc! {}).await?;
        let products = cursor.try_collect().await?;
        Ok(products)
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };
        let result = self.coll.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count == 1)
    }
}
