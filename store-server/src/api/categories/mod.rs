//! Category and ProductType API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/categories", category_routes())
        .nest("/api/product-types", product_type_routes())
}

fn category_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_categories).post(handler::create_category))
        .route(
            "/{id}",
            get(handler::get_category)
                .put(handler::update_category)
                .delete(handler::delete_category),
        )
}

fn product_type_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list_product_types).post(handler::create_product_type),
        )
        .route(
            "/{id}",
            get(handler::get_product_type)
                .put(handler::update_product_type)
                .delete(handler::delete_product_type),
        )
}
