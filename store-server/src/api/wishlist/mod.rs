//! Wishlist API module - all routes require authentication

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/wishlist", wishlist_routes())
}

fn wishlist_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route(
            "/{product_id}",
            post(handler::add).delete(handler::remove),
        )
}
