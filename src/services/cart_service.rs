//! Cart mutation engine.
//!
//! Every operation is the same read-after-write-then-enrich sequence: perform
//! the storage mutation, re-fetch the full cart document, price its items
//! against the live catalog. A re-fetch miss means the cart vanished
//! concurrently and is reported as not-found even when the mutation itself
//! nominally succeeded.

use crate::dto::cart::{CartItemRequest, CartResponse, OrderSummaryResponse};
use crate::error::{AppError, AppResult};
use crate::models::{Cart, CartItem};
use crate::services::pricing;
use crate::state::AppState;

/// Result of `add_item_or_create`: the enriched cart, plus whether a brand-new
/// cart was created so the HTTP layer can answer 201 with a Location header.
pub struct AddItemOutcome {
    pub cart: CartResponse,
    pub created: bool,
}

pub async fn create_cart(
    state: &AppState,
    items: Vec<CartItemRequest>,
) -> AppResult<CartResponse> {
    let items = items
        .into_iter()
        .map(to_cart_item)
        .collect::<AppResult<Vec<_>>>()?;
    let cart = state.carts.insert(items).await?;
    enrich_cart(state, cart).await
}

pub async fn get_cart(state: &AppState, cart_id: &str) -> AppResult<CartResponse> {
    match state.carts.find_by_id(cart_id).await? {
        Some(cart) => enrich_cart(state, cart).await,
        None => Err(AppError::NotFound),
    }
}

pub async fn list_carts(state: &AppState) -> AppResult<Vec<CartResponse>> {
    let carts = state.carts.find_all().await?;
    let mut out = Vec::with_capacity(carts.len());
    for cart in carts {
        out.push(enrich_cart(state, cart).await?);
    }
    Ok(out)
}

/// Merge the item into the cart: increment quantity when the product is
/// already present, append a new line item otherwise. The product must exist
/// in the catalog; the cart must exist.
pub async fn add_item(
    state: &AppState,
    cart_id: &str,
    item: CartItemRequest,
) -> AppResult<CartResponse> {
    let item = to_cart_item(item)?;
    ensure_product_exists(state, &item.product_id).await?;

    let modified = state
        .carts
        .inc_item_quantity(cart_id, &item.product_id, item.quantity)
        .await?;
    if modified == 0 {
        // No line item for this product yet; append one. When the cart itself
        // is missing the push matches nothing and the re-fetch reports it.
        state.carts.push_item(cart_id, &item).await?;
    }

    refetch(state, cart_id).await
}

/// Like `add_item`, but a missing (or malformed-id) cart falls through to
/// creating a brand-new cart holding just this item. The product check still
/// rejects unknown products before anything is written.
pub async fn add_item_or_create(
    state: &AppState,
    cart_id: &str,
    item: CartItemRequest,
) -> AppResult<AddItemOutcome> {
    match add_item(state, cart_id, item.clone()).await {
        Ok(cart) => Ok(AddItemOutcome {
            cart,
            created: false,
        }),
        Err(AppError::NotFound) => {
            let cart = create_cart(state, vec![item]).await?;
            Ok(AddItemOutcome {
                cart,
                created: true,
            })
        }
        Err(err) => Err(err),
    }
}

/// Set the quantity of an existing line item. Does not re-validate that the
/// product still resolves in the catalog.
pub async fn update_quantity(
    state: &AppState,
    cart_id: &str,
    product_id: &str,
    quantity: i64,
) -> AppResult<CartResponse> {
    ensure_positive_quantity(quantity)?;
    let matched = state
        .carts
        .set_item_quantity(cart_id, product_id, quantity)
        .await?;
    if matched == 0 {
        return Err(AppError::NotFound);
    }
    refetch(state, cart_id).await
}

/// Remove a line item. Removing an item that is not present is a silent
/// no-op; the (unchanged) enriched cart is still returned.
pub async fn remove_item(
    state: &AppState,
    cart_id: &str,
    product_id: &str,
) -> AppResult<CartResponse> {
    state.carts.pull_item(cart_id, product_id).await?;
    refetch(state, cart_id).await
}

pub async fn clear_cart(state: &AppState, cart_id: &str) -> AppResult<CartResponse> {
    state.carts.clear_items(cart_id).await?;
    refetch(state, cart_id).await
}

pub async fn delete_cart(state: &AppState, cart_id: &str) -> AppResult<()> {
    if state.carts.delete_by_id(cart_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}

/// Materialize the cart into an order summary, then hard-delete the cart.
///
/// Not transactional: the read and the delete are two storage calls, and a
/// crash between them leaves the cart behind. The store offers no
/// multi-document transaction here, so the gap stands rather than pretending
/// otherwise.
pub async fn checkout(state: &AppState, cart_id: &str) -> AppResult<OrderSummaryResponse> {
    let cart = match state.carts.find_by_id(cart_id).await? {
        Some(cart) => cart,
        None => return Err(AppError::NotFound),
    };
    let (items, total_amount) = pricing::enrich(&state.products, &cart.items).await?;
    let summary = OrderSummaryResponse {
        cart_id: cart.id.to_hex(),
        items,
        total_amount,
        status: "processed".to_string(),
    };
    state.carts.delete_by_id(cart_id).await?;
    Ok(summary)
}

async fn refetch(state: &AppState, cart_id: &str) -> AppResult<CartResponse> {
    match state.carts.find_by_id(cart_id).await? {
        Some(cart) => enrich_cart(state, cart).await,
        None => Err(AppError::NotFound),
    }
}

async fn enrich_cart(state: &AppState, cart: Cart) -> AppResult<CartResponse> {
    let (items, total_amount) = pricing::enrich(&state.products, &cart.items).await?;
    Ok(CartResponse {
        id: cart.id.to_hex(),
        items,
        total_amount,
    })
}

async fn ensure_product_exists(state: &AppState, product_id: &str) -> AppResult<()> {
    if state.products.find_by_id(product_id).await?.is_none() {
        return Err(AppError::Validation("product not found".to_string()));
    }
    Ok(())
}

fn to_cart_item(item: CartItemRequest) -> AppResult<CartItem> {
    ensure_positive_quantity(item.quantity)?;
    Ok(CartItem {
        product_id: item.product_id,
        quantity: item.quantity,
    })
}

fn ensure_positive_quantity(quantity: i64) -> AppResult<()> {
    if quantity <= 0 {
        return Err(AppError::Validation(
            "quantity must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
