use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    dto::cart::{
        CartItemRequest, CartList, CartResponse, CreateCartRequest, OrderSummaryResponse,
        UpdateQuantityRequest,
    },
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_cart).get(list_carts))
        .route(
            "/{id}",
            axum::routing::get(get_cart).delete(delete_cart),
        )
        .route(
            "/{id}/items",
            axum::routing::post(add_item)
                .put(add_item_or_create)
                .delete(clear_cart),
        )
        .route(
            "/{id}/items/{product_id}",
            axum::routing::patch(update_quantity).delete(remove_item),
        )
        .route("/{id}/checkout", axum::routing::post(checkout))
}

fn cart_location(cart: &CartResponse) -> (header::HeaderName, String) {
    (header::LOCATION, format!("/api/v1/cart/{}", cart.id))
}

#[utoipa::path(
    post,
    path = "/api/v1/cart",
    request_body = CreateCartRequest,
    responses(
        (status = 201, description = "Create cart, empty or with initial items", body = ApiResponse<CartResponse>),
        (status = 400, description = "Invalid item quantity"),
    ),
    tag = "Cart"
)]
pub async fn create_cart(
    State(state): State<AppState>,
    Json(payload): Json<CreateCartRequest>,
) -> AppResult<Response> {
    let cart = cart_service::create_cart(&state, payload.items).await?;
    let location = cart_location(&cart);
    let body = Json(ApiResponse::success("Cart created", cart));
    Ok((StatusCode::CREATED, [location], body).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/cart",
    responses(
        (status = 200, description = "List carts with recomputed totals", body = ApiResponse<CartList>)
    ),
    tag = "Cart"
)]
pub async fn list_carts(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CartList>>> {
    let items = cart_service::list_carts(&state).await?;
    Ok(Json(ApiResponse::success("Carts", CartList { items })))
}

#[utoipa::path(
    get,
    path = "/api/v1/cart/{id}",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Cart with items priced against the current catalog", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let cart = cart_service::get_cart(&state, &id).await?;
    Ok(Json(ApiResponse::success("Cart", cart)))
}

#[utoipa::path(
    post,
    path = "/api/v1/cart/{id}/items",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Item merged into cart", body = ApiResponse<CartResponse>),
        (status = 400, description = "Unknown product or invalid quantity"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(item): Json<CartItemRequest>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let cart = cart_service::add_item(&state, &id, item).await?;
    Ok(Json(ApiResponse::success("Item added", cart)))
}

#[utoipa::path(
    put,
    path = "/api/v1/cart/{id}/items",
    params(
        ("id" = String, Path, description = "Cart ID; a missing or malformed id creates a new cart")
    ),
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Item merged into existing cart", body = ApiResponse<CartResponse>),
        (status = 201, description = "New cart created holding the item", body = ApiResponse<CartResponse>),
        (status = 400, description = "Unknown product or invalid quantity"),
    ),
    tag = "Cart"
)]
pub async fn add_item_or_create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(item): Json<CartItemRequest>,
) -> AppResult<Response> {
    let outcome = cart_service::add_item_or_create(&state, &id, item).await?;
    if outcome.created {
        let location = cart_location(&outcome.cart);
        let body = Json(ApiResponse::success("Cart created", outcome.cart));
        Ok((StatusCode::CREATED, [location], body).into_response())
    } else {
        let body = Json(ApiResponse::success("Item added", outcome.cart));
        Ok(body.into_response())
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/cart/{id}/items/{product_id}",
    params(
        ("id" = String, Path, description = "Cart ID"),
        ("product_id" = String, Path, description = "Product ID of the line item")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated", body = ApiResponse<CartResponse>),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Cart or line item not found"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let cart = cart_service::update_quantity(&state, &id, &product_id, payload.quantity).await?;
    Ok(Json(ApiResponse::success("Quantity updated", cart)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart/{id}/items/{product_id}",
    params(
        ("id" = String, Path, description = "Cart ID"),
        ("product_id" = String, Path, description = "Product ID of the line item")
    ),
    responses(
        (status = 200, description = "Item removed; removing an absent item is a no-op", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let cart = cart_service::remove_item(&state, &id, &product_id).await?;
    Ok(Json(ApiResponse::success("Item removed", cart)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart/{id}/items",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "All items removed", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let cart = cart_service::clear_cart(&state, &id).await?;
    Ok(Json(ApiResponse::success("Cart cleared", cart)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart/{id}",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    responses(
        (status = 204, description = "Cart deleted"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Cart"
)]
pub async fn delete_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    cart_service::delete_cart(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/cart/{id}/checkout",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Order summary; the cart is deleted", body = ApiResponse<OrderSummaryResponse>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Cart"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderSummaryResponse>>> {
    let summary = cart_service::checkout(&state, &id).await?;
    Ok(Json(ApiResponse::success("Order processed", summary)))
}
