pub mod catalog;
pub mod common;
pub mod reviews;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// The storefront HTTP surface.
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::home))
        .route("/products", get(catalog::list_products))
        .route("/products/:category_slug", get(catalog::list_category_products))
        .route(
            "/products/:category_slug/:product_slug",
            get(catalog::product_details),
        )
        .route("/search", get(catalog::search))
        .route("/review/:product_id", post(reviews::submit_review))
}
