use mongodb::bson::oid::ObjectId;

use crate::dto::products::{CreateProductRequest, ProductResponse};
use crate::error::{AppError, AppResult};
use crate::models::Product;
use crate::state::AppState;

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ProductResponse> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    if payload.price <= 0.0 {
        return Err(AppError::Validation(
            "price must be greater than 0".to_string(),
        ));
    }
    if payload.in_stock < 0 {
        return Err(AppError::Validation(
            "in_stock must not be negative".to_string(),
        ));
    }

    let product = Product {
        id: ObjectId::new(),
        name: payload.name,
        description: payload.description,
        price: payload.price,
        in_stock: payload.in_stock,
    };
    let stored = state.products.insert(product).await?;
    Ok(stored.into())
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ProductResponse> {
    match state.products.find_by_id(id).await? {
        Some(product) => Ok(product.into()),
        None => Err(AppError::NotFound),
    }
}

pub async fn list_products(state: &AppState) -> AppResult<Vec<ProductResponse>> {
    let products = state.products.find_all().await?;
    Ok(products.into_iter().map(Into::into).collect())
}

pub async fn delete_product(state: &AppState, id: &str) -> AppResult<()> {
    if state.products.delete_by_id(id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}
