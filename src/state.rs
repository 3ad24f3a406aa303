use mongodb::Database;

use crate::repos::{CartRepo, ProductRepo};

/// Shared per-process handles, injected into every request handler. The repos
/// clone cheaply; the underlying connection pool lives in the Mongo client.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductRepo,
    pub carts: CartRepo,
}

impl AppState {
    pub fn new(db: &Database) -> Self {
        Self {
            products: ProductRepo::new(db),
            carts: CartRepo::new(db),
        }
    }
}
