//! Razorpay HTTP client
//!
//! Creates gateway orders and fetches payment details. When credentials are
//! absent the client runs in mock mode: orders get a deterministic
//! `order_mock_` id and signature checks run against a fixed development
//! secret, so the whole checkout flow works without live keys.

use serde::{Deserialize, Serialize};
use shared::checkout::GatewayOrder;
use shared::{AppError, AppResult, ErrorCode};
use uuid::Uuid;

const RAZORPAY_BASE_URL: &str = "https://api.razorpay.com/v1";
const CURRENCY: &str = "INR";

/// Development signature secret used in mock mode
const MOCK_SECRET: &str = "hemline_dev_secret";

/// Minor units (paise) per currency unit
const PAISE_PER_UNIT: i64 = 100;

#[derive(Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: Option<String>,
    key_secret: Option<String>,
    base_url: String,
}

/// Gateway order creation payload
#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    /// Amount in paise
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

/// Gateway order as returned by the API
#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

/// Payment details fetched after verification
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDetails {
    pub id: String,
    /// Amount in paise
    pub amount: i64,
    pub status: String,
    pub method: String,
}

impl RazorpayClient {
    pub fn new(key_id: Option<String>, key_secret: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id,
            key_secret,
            base_url: RAZORPAY_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether the client runs without live credentials
    pub fn is_mock(&self) -> bool {
        self.key_id.is_none() || self.key_secret.is_none()
    }

    /// Secret used for signature verification
    pub fn signing_secret(&self) -> &str {
        self.key_secret.as_deref().unwrap_or(MOCK_SECRET)
    }

    /// Create a gateway order for `amount` whole currency units
    pub async fn create_order(&self, amount: i64, receipt: &str) -> AppResult<GatewayOrder> {
        let amount_paise = amount * PAISE_PER_UNIT;

        if self.is_mock() {
            let order = GatewayOrder {
                gateway_order_id: format!("order_mock_{}", Uuid::new_v4().simple()),
                amount: amount_paise,
                currency: CURRENCY.to_string(),
                key_id: None,
                mock: true,
            };
            tracing::info!(
                gateway_order_id = %order.gateway_order_id,
                amount_paise,
                "Gateway credentials absent, issued mock order"
            );
            return Ok(order);
        }

        let body = CreateOrderBody {
            amount: amount_paise,
            currency: CURRENCY,
            receipt,
        };

        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(self.key_id.as_deref().unwrap_or_default(), self.key_secret.as_deref())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(ErrorCode::GatewayError, format!("order create failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %text, "Gateway rejected order creation");
            return Err(AppError::with_message(
                ErrorCode::GatewayError,
                format!("gateway returned {status}"),
            ));
        }

        let order: OrderResponse = response.json().await.map_err(|e| {
            AppError::with_message(ErrorCode::GatewayError, format!("malformed gateway response: {e}"))
        })?;

        Ok(GatewayOrder {
            gateway_order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key_id: self.key_id.clone(),
            mock: false,
        })
    }

    /// Fetch payment details after a verified signature
    ///
    /// Never called in mock mode; callers synthesize the confirmation from
    /// the stored order instead.
    pub async fn fetch_payment(&self, payment_id: &str) -> AppResult<PaymentDetails> {
        let response = self
            .http
            .get(format!("{}/payments/{payment_id}", self.base_url))
            .basic_auth(self.key_id.as_deref().unwrap_or_default(), self.key_secret.as_deref())
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(ErrorCode::GatewayError, format!("payment fetch failed: {e}"))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::new(ErrorCode::PaymentNotFound));
        }
        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::GatewayError,
                format!("gateway returned {}", response.status()),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::with_message(ErrorCode::GatewayError, format!("malformed gateway response: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_order_when_credentials_absent() {
        let client = RazorpayClient::new(None, None);
        assert!(client.is_mock());

        let order = client.create_order(1350, "ORD-TEST0001").await.unwrap();
        assert!(order.mock);
        assert!(order.gateway_order_id.starts_with("order_mock_"));
        assert_eq!(order.amount, 135_000); // paise
        assert_eq!(order.currency, "INR");
        assert!(order.key_id.is_none());
    }

    #[test]
    fn test_live_mode_requires_both_keys() {
        let client = RazorpayClient::new(Some("rzp_test_key".into()), None);
        assert!(client.is_mock());

        let client = RazorpayClient::new(Some("rzp_test_key".into()), Some("secret".into()));
        assert!(!client.is_mock());
        assert_eq!(client.signing_secret(), "secret");
    }

    #[test]
    fn test_mock_signing_secret_is_stable() {
        let client = RazorpayClient::new(None, None);
        assert_eq!(client.signing_secret(), MOCK_SECRET);
    }
}
