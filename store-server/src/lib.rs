//! Hemline Store Server - clothing storefront backend
//!
//! # Architecture overview
//!
//! This crate is the storefront's REST API server, providing:
//!
//! - **Catalog** (`api/products`, `api/categories`, `api/size_charts`):
//!   product, category, product-type and size-chart management
//! - **Cart** (`api/cart`, `cart`): per-user carts with stock-aware
//!   quantity checks and guest-cart merge
//! - **Checkout** (`checkout`, `api/checkout`): server-side amount
//!   reconciliation and payment-gateway order creation
//! - **Payments** (`payment`): Razorpay HTTP client and signature
//!   verification, with a mock mode when credentials are absent
//! - **Orders** (`api/orders`, `shipping`): order lifecycle and
//!   shipping-partner integration
//! - **Database** (`db`): embedded SurrealDB storage
//! - **Auth** (`auth`): JWT + Argon2 authentication
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # config, state, server, rate limiting
//! ├── auth/          # JWT auth, extractors
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! ├── pricing/       # quantity-tier discount calculator
//! ├── checkout/      # amount reconciliation engine
//! ├── payment/       # gateway client and signature checks
//! ├── shipping/      # shipping-partner client
//! ├── cart/          # stock availability checks
//! └── utils/         # logger, validation, time helpers
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod core;
pub mod db;
pub mod payment;
pub mod pricing;
pub mod shipping;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __  __               __ _
   / / / /__  ____ ___  / /(_)___  ___
  / /_/ / _ \/ __ `__ \/ / / __ \/ _ \
 / __  /  __/ / / / / / / / / / /  __/
/_/ /_/\___/_/ /_/ /_/_/_/_/ /_/\___/
    "#
    );
}

/// Load `.env` and initialize logging
///
/// Called once at the very start of `main`.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        log_dir.as_deref(),
    );
    Ok(())
}
