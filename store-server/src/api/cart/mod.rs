//! Cart API module - all routes require authentication

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).delete(handler::clear))
        .route("/items", post(handler::add_item))
        .route(
            "/items/{id}",
            put(handler::update_item).delete(handler::remove_item),
        )
        .route("/merge", post(handler::merge))
}
