//! Coupon Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// Coupon discount type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Coupon entity
///
/// Validated against the cart subtotal only, never against the
/// post-discount amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    /// Uppercased unique code, e.g. "FLAT100"
    pub code: String,
    pub discount_type: DiscountType,
    /// Percent (percentage type) or whole currency units (fixed type)
    pub discount_value: i64,
    #[serde(default)]
    pub minimum_purchase: i64,
    #[serde(default)]
    pub max_discount: Option<i64>,
    /// Unix millis; no expiry when absent
    #[serde(default)]
    pub valid_until: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCreate {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub minimum_purchase: Option<i64>,
    pub max_discount: Option<i64>,
    pub valid_until: Option<i64>,
}

/// Update coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponUpdate {
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<i64>,
    pub minimum_purchase: Option<i64>,
    pub max_discount: Option<i64>,
    pub valid_until: Option<i64>,
    pub is_active: Option<bool>,
}

/// Coupon validation request (public endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponValidateRequest {
    pub code: String,
    pub subtotal: i64,
}
