//! AOV (average order value) API module
//!
//! Quantity-discount preview for carts and admin management of the tier
//! table. The server is the single source of truth for tiers.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/aov", aov_routes())
}

fn aov_routes() -> Router<ServerState> {
    Router::new()
        .route("/quantity-discount", post(handler::quantity_discount))
        .route(
            "/quantity-discounts",
            get(handler::list_tiers).put(handler::update_tiers),
        )
}
