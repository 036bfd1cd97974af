//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness and component checks
//! - [`auth`] - registration, login, current user
//! - [`products`] - catalog CRUD
//! - [`categories`] - category and product-type CRUD
//! - [`size_charts`] - size chart CRUD
//! - [`cart`] - per-user cart with stock checks and guest merge
//! - [`coupons`] - coupon CRUD and validation
//! - [`aov`] - quantity-discount preview and tier configuration
//! - [`checkout`] - amount reconciliation, order creation, payment verify
//! - [`orders`] - order listing, status transitions, shipping
//! - [`reviews`] - product reviews
//! - [`wishlist`] - per-user wishlist
//! - [`settings`] - store settings (admin)

pub mod aov;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod coupons;
pub mod health;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod settings;
pub mod size_charts;
pub mod wishlist;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

/// Assemble the full application router
pub fn app(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(size_charts::router())
        .merge(cart::router())
        .merge(coupons::router())
        .merge(aov::router())
        .merge(checkout::router())
        .merge(orders::router())
        .merge(reviews::router())
        .merge(wishlist::router())
        .merge(settings::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
