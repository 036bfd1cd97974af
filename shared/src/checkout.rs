//! Checkout wire types
//!
//! Request/response payloads for the amount-reconciliation and payment
//! endpoints, shared between the store server and its API consumers.

use serde::{Deserialize, Serialize};

/// A single cart line submitted at checkout
///
/// `product` is either a product record id or the literal `"custom"` for
/// made-to-order items priced from the configured base price plus placement
/// fees. Client-supplied prices are never trusted; the server re-derives every
/// line total from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub product: String,
    pub size: String,
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub customization: Option<Customization>,
}

impl CheckoutLine {
    /// Whether this line is a made-to-order custom item
    pub fn is_custom(&self) -> bool {
        self.product == CUSTOM_PRODUCT
    }
}

/// Sentinel product id for made-to-order custom items
pub const CUSTOM_PRODUCT: &str = "custom";

/// Customization details for a custom line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customization {
    /// Print placements, e.g. "front", "back", "sleeve"
    pub placements: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Quantity discount tier
///
/// Tiers are stored ascending by `min_quantity`; the highest tier whose
/// `min_quantity` does not exceed the cart's total quantity applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_quantity: i64,
    pub discount_percent: u32,
}

/// Request body for the amount-reconciliation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateAmountRequest {
    pub items: Vec<CheckoutLine>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    /// Reward points to redeem (authenticated users only)
    #[serde(default)]
    pub points_used: Option<i64>,
    /// Client-computed total, compared against the server total for
    /// observability only
    #[serde(default)]
    pub client_total: Option<i64>,
}

/// Server-derived amount breakdown (all values in whole currency units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountBreakdown {
    pub subtotal: i64,
    pub shipping_cost: i64,
    pub quantity_discount: i64,
    pub coupon_discount: i64,
    pub reward_discount: i64,
    pub total: i64,
    pub total_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_tier: Option<DiscountTier>,
    /// Smallest tier above the current quantity, for upsell messaging only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_tier: Option<DiscountTier>,
}

/// Request body for the standalone quantity-discount preview endpoint
///
/// Lines here carry client prices because the preview runs before checkout;
/// the reconciliation path ignores client prices entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityDiscountRequest {
    pub items: Vec<PricedLine>,
}

/// A priced line for the quantity-discount preview
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricedLine {
    pub price: i64,
    pub quantity: i64,
}

/// Quantity-discount preview response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityDiscountPreview {
    pub total_quantity: i64,
    pub subtotal: i64,
    pub discount: i64,
    pub discount_percent: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_tier: Option<DiscountTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_tier: Option<DiscountTier>,
}

/// Gateway order returned to the client for payment collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway order id (`order_...`)
    pub gateway_order_id: String,
    /// Amount in the gateway's minor unit (paise)
    pub amount: i64,
    pub currency: String,
    /// Public key id for the client-side checkout widget, absent in mock mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    /// True when gateway credentials are absent and a mock order was issued
    pub mock: bool,
}

/// Post-payment verification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Verified payment details reported back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub payment_id: String,
    pub status: String,
    /// Amount in the gateway's minor unit (paise)
    pub amount: i64,
    pub method: String,
    /// Reward points credited to the user for this order
    pub points_earned: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_line_detection() {
        let line = CheckoutLine {
            product: CUSTOM_PRODUCT.to_string(),
            size: "M".to_string(),
            color: None,
            quantity: 1,
            customization: Some(Customization {
                placements: vec!["front".to_string()],
                note: None,
            }),
        };
        assert!(line.is_custom());

        let line = CheckoutLine {
            product: "product:tee01".to_string(),
            size: "L".to_string(),
            color: None,
            quantity: 2,
            customization: None,
        };
        assert!(!line.is_custom());
    }

    #[test]
    fn test_calculate_request_optional_fields() {
        let json = r#"{"items":[{"product":"product:tee01","size":"M","quantity":2}]}"#;
        let req: CalculateAmountRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.items.len(), 1);
        assert!(req.coupon_code.is_none());
        assert!(req.points_used.is_none());
        assert!(req.client_total.is_none());
    }

    #[test]
    fn test_breakdown_omits_absent_tiers() {
        let breakdown = AmountBreakdown {
            subtotal: 1000,
            shipping_cost: 0,
            quantity_discount: 0,
            coupon_discount: 0,
            reward_discount: 0,
            total: 1000,
            total_quantity: 2,
            applied_tier: None,
            next_tier: None,
        };
        let json = serde_json::to_string(&breakdown).unwrap();
        assert!(!json.contains("applied_tier"));
        assert!(!json.contains("next_tier"));
    }
}
