use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/hemline | Working directory (database, logs) |
/// | HTTP_PORT | 8080 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | RAZORPAY_KEY_ID | (unset) | Gateway key id; mock mode when absent |
/// | RAZORPAY_KEY_SECRET | (unset) | Gateway key secret |
/// | SHIPPING_API_URL | (unset) | Shipping partner base URL; mock when absent |
/// | SHIPPING_API_KEY | (unset) | Shipping partner API key |
/// | PICKUP_PINCODE | 110001 | Warehouse pincode for rate quotes |
/// | GUEST_ORDER_LIMIT | 5 | Guest orders allowed per window |
/// | GUEST_ORDER_WINDOW_SECS | 3600 | Guest rate-limit window |
/// | SHUTDOWN_DRAIN_MS | 10000 | 503-draining window before the listener stops |
/// | SPOT_TERMINATION_URL | (unset) | Cloud spot-termination notice endpoint |
/// | ADMIN_EMAIL / ADMIN_PASSWORD | (unset) | Admin account ensured at startup |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/hemline HTTP_PORT=9000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT authentication configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,

    // === Payment gateway ===
    /// Razorpay key id (mock mode when absent)
    pub razorpay_key_id: Option<String>,
    /// Razorpay key secret
    pub razorpay_key_secret: Option<String>,

    // === Shipping partner ===
    /// Shipping partner base URL (mock mode when absent)
    pub shipping_api_url: Option<String>,
    /// Shipping partner API key
    pub shipping_api_key: Option<String>,
    /// Warehouse pincode used for rate quotes
    pub pickup_pincode: String,

    // === Guest checkout ===
    /// Guest orders allowed per window per IP+email
    pub guest_order_limit: u32,
    /// Guest rate-limit window in seconds
    pub guest_order_window_secs: u64,

    // === Shutdown ===
    /// How long /health reports 503 before the listener stops
    pub shutdown_drain_ms: u64,
    /// Optional cloud spot-termination notice endpoint, polled in background
    pub spot_termination_url: Option<String>,

    // === Bootstrap ===
    /// Admin account ensured at startup when both are set
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/hemline".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            razorpay_key_id: std::env::var("RAZORPAY_KEY_ID").ok(),
            razorpay_key_secret: std::env::var("RAZORPAY_KEY_SECRET").ok(),

            shipping_api_url: std::env::var("SHIPPING_API_URL").ok(),
            shipping_api_key: std::env::var("SHIPPING_API_KEY").ok(),
            pickup_pincode: std::env::var("PICKUP_PINCODE").unwrap_or_else(|_| "110001".into()),

            guest_order_limit: std::env::var("GUEST_ORDER_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            guest_order_window_secs: std::env::var("GUEST_ORDER_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),

            shutdown_drain_ms: std::env::var("SHUTDOWN_DRAIN_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            spot_termination_url: std::env::var("SPOT_TERMINATION_URL").ok(),

            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Override work dir and port, for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development deployment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Directory holding the embedded database files
    pub fn database_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("database")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
