//! Server state
//!
//! [`ServerState`] holds shared references to every service; cloning is a
//! set of `Arc` bumps.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio_util::sync::CancellationToken;

use crate::auth::JwtService;
use crate::checkout::AmountCalculator;
use crate::core::Config;
use crate::core::rate_limit::GuestRateLimiter;
use crate::db::DbService;
use crate::payment::RazorpayClient;
use crate::shipping::ShippingClient;

/// Shutdown coordination
///
/// `begin()` flips the flag that makes `/health` report 503; the token wakes
/// the server task when a termination notice arrives from outside the signal
/// path (spot-termination watcher).
#[derive(Clone, Debug, Default)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    token: CancellationToken,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the draining window
    pub fn begin(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether the server is draining
    pub fn is_shutting_down(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Request termination from a background watcher
    pub fn request_termination(&self) {
        self.token.cancel();
    }

    /// Resolves when termination has been requested
    pub async fn termination_requested(&self) {
        self.token.cancelled().await
    }
}

/// Server state - shared references to all services
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT authentication service
    pub jwt_service: Arc<JwtService>,
    /// Payment gateway client
    pub razorpay: Arc<RazorpayClient>,
    /// Shipping partner client
    pub shipping: Arc<ShippingClient>,
    /// Guest checkout rate limiter
    pub guest_limiter: Arc<GuestRateLimiter>,
    /// Shutdown coordination
    pub shutdown: ShutdownHandle,
}

impl ServerState {
    /// Initialize server state
    ///
    /// Creates the working directory structure, opens the database, and
    /// wires up the gateway/shipping clients from configuration.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir)?;

        let db_service = DbService::new(&db_dir.join("hemline.db")).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let razorpay = Arc::new(RazorpayClient::new(
            config.razorpay_key_id.clone(),
            config.razorpay_key_secret.clone(),
        ));
        let shipping = Arc::new(ShippingClient::new(
            config.shipping_api_url.clone(),
            config.shipping_api_key.clone(),
            config.pickup_pincode.clone(),
        ));
        let guest_limiter = Arc::new(GuestRateLimiter::in_memory(
            config.guest_order_limit,
            config.guest_order_window_secs,
        ));

        if razorpay.is_mock() {
            tracing::warn!("Razorpay credentials absent, payment gateway runs in mock mode");
        }
        if shipping.is_mock() {
            tracing::warn!("Shipping partner not configured, labels run in mock mode");
        }

        let state = Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service,
            razorpay,
            shipping,
            guest_limiter,
            shutdown: ShutdownHandle::new(),
        };

        state.ensure_admin_account().await?;

        Ok(state)
    }

    /// Ensure the configured admin account exists
    ///
    /// Runs only when ADMIN_EMAIL and ADMIN_PASSWORD are both set; an
    /// existing account is left untouched.
    async fn ensure_admin_account(&self) -> anyhow::Result<()> {
        let (Some(email), Some(password)) = (
            self.config.admin_email.clone(),
            self.config.admin_password.clone(),
        ) else {
            return Ok(());
        };

        let users = crate::db::repository::UserRepository::new(self.db.clone());
        if users
            .find_by_email(&email)
            .await
            .map_err(|e| anyhow::anyhow!("admin lookup failed: {e}"))?
            .is_some()
        {
            return Ok(());
        }

        let user = crate::db::models::User {
            id: None,
            username: "admin".to_string(),
            email: email.trim().to_lowercase(),
            password_hash: crate::auth::hash_password(&password)
                .map_err(|e| anyhow::anyhow!("admin password hashing failed: {e}"))?,
            role: crate::db::models::Role::Admin,
            points_balance: 0,
            is_active: true,
            created_at: crate::utils::time::now_millis(),
        };
        users
            .create(user)
            .await
            .map_err(|e| anyhow::anyhow!("admin creation failed: {e}"))?;
        tracing::info!(email, "Admin account created");
        Ok(())
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Amount calculator over this state's database
    pub fn calculator(&self) -> AmountCalculator {
        AmountCalculator::new(self.db.clone())
    }
}
