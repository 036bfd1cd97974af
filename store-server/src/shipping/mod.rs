//! Shipping-partner client
//!
//! Rate quotes and label generation through the configured shipping partner,
//! with deterministic mock behavior when no partner is configured. Follows
//! the same credentials-absent-means-mock convention as the payment gateway.

use crate::db::models::Address;
use serde::{Deserialize, Serialize};
use shared::{AppError, AppResult, ErrorCode};
use uuid::Uuid;

/// Assumed packed weight per garment, used for rate quotes
const WEIGHT_PER_ITEM_GRAMS: i64 = 350;

/// Mock quote parameters: base fee plus a per-500g step
const MOCK_BASE_RATE: i64 = 60;
const MOCK_RATE_PER_STEP: i64 = 20;
const MOCK_STEP_GRAMS: i64 = 500;

#[derive(Clone)]
pub struct ShippingClient {
    http: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
    pickup_pincode: String,
}

/// Partner rate quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateQuote {
    pub courier: String,
    /// Whole currency units
    pub rate: i64,
    pub estimated_days: i32,
}

/// Generated shipping label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingLabel {
    pub tracking_id: String,
    pub label_url: String,
}

#[derive(Debug, Serialize)]
struct RateRequestBody<'a> {
    pickup_pincode: &'a str,
    delivery_pincode: &'a str,
    weight_grams: i64,
}

#[derive(Debug, Serialize)]
struct LabelRequestBody<'a> {
    order_number: &'a str,
    pickup_pincode: &'a str,
    address: &'a Address,
}

impl ShippingClient {
    pub fn new(
        base_url: Option<String>,
        api_key: Option<String>,
        pickup_pincode: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            pickup_pincode,
        }
    }

    /// Whether the client runs without a configured partner
    pub fn is_mock(&self) -> bool {
        self.base_url.is_none()
    }

    /// Estimated packed weight for an item count
    pub fn estimate_weight_grams(total_items: i64) -> i64 {
        total_items.max(1) * WEIGHT_PER_ITEM_GRAMS
    }

    /// Quote a shipping rate to `delivery_pincode`
    pub async fn rate_quote(
        &self,
        delivery_pincode: &str,
        weight_grams: i64,
    ) -> AppResult<RateQuote> {
        let Some(base_url) = &self.base_url else {
            let steps = (weight_grams + MOCK_STEP_GRAMS - 1) / MOCK_STEP_GRAMS;
            return Ok(RateQuote {
                courier: "MockExpress".to_string(),
                rate: MOCK_BASE_RATE + steps * MOCK_RATE_PER_STEP,
                estimated_days: 4,
            });
        };

        let body = RateRequestBody {
            pickup_pincode: &self.pickup_pincode,
            delivery_pincode,
            weight_grams,
        };

        let response = self
            .http
            .post(format!("{base_url}/rates"))
            .bearer_auth(self.api_key.as_deref().unwrap_or_default())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(
                    ErrorCode::ShippingPartnerError,
                    format!("rate quote failed: {e}"),
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::ShippingPartnerError,
                format!("shipping partner returned {}", response.status()),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::with_message(
                ErrorCode::ShippingPartnerError,
                format!("malformed partner response: {e}"),
            )
        })
    }

    /// Generate a shipping label for an order
    pub async fn create_label(
        &self,
        order_number: &str,
        address: &Address,
    ) -> AppResult<ShippingLabel> {
        let Some(base_url) = &self.base_url else {
            return Ok(ShippingLabel {
                tracking_id: format!("TRK-{}", Uuid::new_v4().simple()),
                label_url: format!("https://shipping.mock/labels/{order_number}.pdf"),
            });
        };

        let body = LabelRequestBody {
            order_number,
            pickup_pincode: &self.pickup_pincode,
            address,
        };

        let response = self
            .http
            .post(format!("{base_url}/labels"))
            .bearer_auth(self.api_key.as_deref().unwrap_or_default())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(
                    ErrorCode::ShippingPartnerError,
                    format!("label creation failed: {e}"),
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::ShippingPartnerError,
                format!("shipping partner returned {}", response.status()),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::with_message(
                ErrorCode::ShippingPartnerError,
                format!("malformed partner response: {e}"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_rate_quote() {
        let client = ShippingClient::new(None, None, "110001".into());
        assert!(client.is_mock());

        let quote = client.rate_quote("560001", 700).await.unwrap();
        assert_eq!(quote.courier, "MockExpress");
        // 700g → two 500g steps
        assert_eq!(quote.rate, MOCK_BASE_RATE + 2 * MOCK_RATE_PER_STEP);
    }

    #[tokio::test]
    async fn test_mock_label() {
        let client = ShippingClient::new(None, None, "110001".into());
        let address = Address {
            name: "A".into(),
            phone: "9999999999".into(),
            line1: "1 MG Road".into(),
            line2: None,
            city: "Bengaluru".into(),
            state: "KA".into(),
            pincode: "560001".into(),
            country: "IN".into(),
        };
        let label = client.create_label("ORD-TEST0001", &address).await.unwrap();
        assert!(label.tracking_id.starts_with("TRK-"));
        assert!(label.label_url.contains("ORD-TEST0001"));
    }

    #[test]
    fn test_weight_estimate() {
        assert_eq!(ShippingClient::estimate_weight_grams(3), 1050);
        // Never quotes a zero-weight parcel
        assert_eq!(ShippingClient::estimate_weight_grams(0), 350);
    }
}
