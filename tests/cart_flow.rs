use mongodb::bson::oid::ObjectId;

use korzina_cart_api::{
    db,
    dto::cart::CartItemRequest,
    dto::products::{CreateProductRequest, ProductResponse},
    error::AppError,
    services::{cart_service, pricing, product_service},
    state::AppState,
};

// Integration tests against a live MongoDB. Skipped (with a message) when no
// MONGO_URI is configured in the environment, same as running without a test
// database. Each test works on documents it created itself, so tests can run
// in parallel against one database.
async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let uri = match std::env::var("MONGO_URI") {
        Ok(uri) => uri,
        Err(_) => {
            eprintln!("Skipping test: set MONGO_URI to run cart flow tests.");
            return Ok(None);
        }
    };
    let db_name = std::env::var("MONGO_DB").unwrap_or_else(|_| "korzina_test".to_string());
    let database = db::connect(&uri, &db_name).await?;
    Ok(Some(AppState::new(&database)))
}

async fn seed_product(state: &AppState, name: &str, price: f64) -> anyhow::Result<ProductResponse> {
    let product = product_service::create_product(
        state,
        CreateProductRequest {
            name: name.to_string(),
            description: Some("integration test product".to_string()),
            price,
            in_stock: 10,
        },
    )
    .await?;
    Ok(product)
}

fn item(product_id: &str, quantity: i64) -> CartItemRequest {
    CartItemRequest {
        product_id: product_id.to_string(),
        quantity,
    }
}

#[tokio::test]
async fn repeated_additions_merge_into_one_line_item() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let widget = seed_product(&state, "Widget", 10.0).await?;

    let cart = cart_service::create_cart(&state, vec![]).await?;
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_amount, 0.0);

    let outcome = cart_service::add_item_or_create(&state, &cart.id, item(&widget.id, 2)).await?;
    assert!(!outcome.created);
    assert_eq!(outcome.cart.id, cart.id);
    assert_eq!(outcome.cart.items.len(), 1);
    assert_eq!(outcome.cart.items[0].quantity, 2);
    assert_eq!(outcome.cart.items[0].line_total, 20.0);
    assert_eq!(outcome.cart.total_amount, 20.0);

    let outcome = cart_service::add_item_or_create(&state, &cart.id, item(&widget.id, 3)).await?;
    assert_eq!(outcome.cart.items.len(), 1, "additions must merge, not append");
    assert_eq!(outcome.cart.items[0].quantity, 5);
    assert_eq!(outcome.cart.items[0].line_total, 50.0);
    assert_eq!(outcome.cart.total_amount, 50.0);

    Ok(())
}

#[tokio::test]
async fn add_or_create_with_malformed_id_creates_fresh_cart() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let widget = seed_product(&state, "Widget", 10.0).await?;

    let outcome =
        cart_service::add_item_or_create(&state, "not-a-valid-id", item(&widget.id, 1)).await?;
    assert!(outcome.created);
    assert_ne!(outcome.cart.id, "not-a-valid-id");
    assert_eq!(outcome.cart.items.len(), 1);
    assert_eq!(outcome.cart.total_amount, 10.0);

    Ok(())
}

#[tokio::test]
async fn adding_unknown_product_is_rejected_and_cart_unmodified() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let widget = seed_product(&state, "Widget", 10.0).await?;
    let cart = cart_service::create_cart(&state, vec![item(&widget.id, 1)]).await?;

    // Well-formed id that references nothing in the catalog.
    let missing = ObjectId::new().to_hex();
    let err = cart_service::add_item(&state, &cart.id, item(&missing, 1))
        .await
        .expect_err("unknown product must be rejected");
    assert!(matches!(err, AppError::Validation(_)));

    let after = cart_service::get_cart(&state, &cart.id).await?;
    assert_eq!(after.items.len(), 1);
    assert_eq!(after.items[0].product_id, widget.id);
    assert_eq!(after.total_amount, 10.0);

    Ok(())
}

#[tokio::test]
async fn remove_item_is_idempotent() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let widget = seed_product(&state, "Widget", 10.0).await?;
    let gadget = seed_product(&state, "Gadget", 5.0).await?;
    let cart =
        cart_service::create_cart(&state, vec![item(&widget.id, 1), item(&gadget.id, 2)]).await?;

    let first = cart_service::remove_item(&state, &cart.id, &widget.id).await?;
    assert_eq!(first.items.len(), 1);
    assert_eq!(first.total_amount, 10.0);

    // Second removal of the same product is a silent no-op, not an error.
    let second = cart_service::remove_item(&state, &cart.id, &widget.id).await?;
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.total_amount, 10.0);

    Ok(())
}

#[tokio::test]
async fn clear_cart_empties_items_and_total() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let widget = seed_product(&state, "Widget", 10.0).await?;
    let cart = cart_service::create_cart(&state, vec![item(&widget.id, 4)]).await?;
    assert_eq!(cart.total_amount, 40.0);

    let cleared = cart_service::clear_cart(&state, &cart.id).await?;
    assert!(cleared.items.is_empty());
    assert_eq!(cleared.total_amount, 0.0);

    let fetched = cart_service::get_cart(&state, &cart.id).await?;
    assert!(fetched.items.is_empty());
    assert_eq!(fetched.total_amount, 0.0);

    Ok(())
}

#[tokio::test]
async fn checkout_returns_summary_and_deletes_cart() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let widget = seed_product(&state, "Widget", 12.5).await?;
    let cart = cart_service::create_cart(&state, vec![item(&widget.id, 2)]).await?;

    let summary = cart_service::checkout(&state, &cart.id).await?;
    assert_eq!(summary.cart_id, cart.id);
    assert_eq!(summary.status, "processed");
    assert_eq!(summary.total_amount, 25.0);

    let err = cart_service::get_cart(&state, &cart.id)
        .await
        .expect_err("cart must be gone after checkout");
    assert!(matches!(err, AppError::NotFound));

    Ok(())
}

#[tokio::test]
async fn deleted_product_degrades_to_unresolved_line() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let widget = seed_product(&state, "Widget", 10.0).await?;
    let gadget = seed_product(&state, "Gadget", 3.0).await?;
    let cart =
        cart_service::create_cart(&state, vec![item(&widget.id, 2), item(&gadget.id, 1)]).await?;

    product_service::delete_product(&state, &widget.id).await?;

    let after = cart_service::get_cart(&state, &cart.id).await?;
    // Input order is preserved; the stale line degrades instead of failing.
    assert_eq!(after.items.len(), 2);
    assert_eq!(after.items[0].product_id, widget.id);
    assert_eq!(after.items[0].product_name, pricing::PRODUCT_NOT_FOUND);
    assert_eq!(after.items[0].line_total, 0.0);
    assert_eq!(after.items[1].product_name, "Gadget");
    assert_eq!(after.total_amount, 3.0);

    Ok(())
}

#[tokio::test]
async fn update_quantity_of_absent_item_is_not_found() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let widget = seed_product(&state, "Widget", 10.0).await?;
    let cart = cart_service::create_cart(&state, vec![item(&widget.id, 1)]).await?;

    let absent = ObjectId::new().to_hex();
    let err = cart_service::update_quantity(&state, &cart.id, &absent, 3)
        .await
        .expect_err("no matching line item");
    assert!(matches!(err, AppError::NotFound));

    // The present item still updates fine.
    let updated = cart_service::update_quantity(&state, &cart.id, &widget.id, 3).await?;
    assert_eq!(updated.items[0].quantity, 3);
    assert_eq!(updated.total_amount, 30.0);

    Ok(())
}

#[tokio::test]
async fn delete_cart_then_get_is_not_found() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let cart = cart_service::create_cart(&state, vec![]).await?;

    cart_service::delete_cart(&state, &cart.id).await?;

    let err = cart_service::delete_cart(&state, &cart.id)
        .await
        .expect_err("second delete must be not-found");
    assert!(matches!(err, AppError::NotFound));

    Ok(())
}
