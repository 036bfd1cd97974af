//! Checkout API module
//!
//! Amount reconciliation preview, order creation, and payment verification.
//! All three endpoints accept optional authentication: guests check out with
//! an email and are rate-limited per IP+email.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/checkout", checkout_routes())
}

fn checkout_routes() -> Router<ServerState> {
    Router::new()
        .route("/calculate-amount", post(handler::calculate_amount))
        .route("/order/create", post(handler::create_order))
        .route("/payment/verify", post(handler::verify_payment))
}
