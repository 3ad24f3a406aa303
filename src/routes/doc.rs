use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{
            CartItemRequest, CartList, CartResponse, CreateCartRequest, OrderSummaryResponse,
            PricedItemResponse, UpdateQuantityRequest,
        },
        products::{CreateProductRequest, ProductList, ProductResponse},
    },
    response::ApiResponse,
    routes::{cart, health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::create_product,
        products::list_products,
        products::get_product,
        products::delete_product,
        cart::create_cart,
        cart::list_carts,
        cart::get_cart,
        cart::add_item,
        cart::add_item_or_create,
        cart::update_quantity,
        cart::remove_item,
        cart::clear_cart,
        cart::delete_cart,
        cart::checkout,
    ),
    components(
        schemas(
            CreateProductRequest,
            ProductResponse,
            ProductList,
            CartItemRequest,
            CreateCartRequest,
            UpdateQuantityRequest,
            PricedItemResponse,
            CartResponse,
            CartList,
            OrderSummaryResponse,
            ApiResponse<ProductResponse>,
            ApiResponse<ProductList>,
            ApiResponse<CartResponse>,
            ApiResponse<CartList>,
            ApiResponse<OrderSummaryResponse>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
