//! Order Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use shared::checkout::Customization;
use std::fmt;
use surrealdb::sql::Thing;

/// Order lifecycle status
///
/// `Delivered`, `Cancelled` and `PaymentFailed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    PaymentFailed,
}

impl OrderStatus {
    /// Whether a transition from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Pending, PaymentFailed)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
        )
    }

    /// Whether this status accepts a payment
    pub fn is_payable(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::PaymentFailed => "payment_failed",
        };
        f.write_str(s)
    }
}

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Razorpay,
    Cod,
}

/// A line item frozen into an order at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product reference ("product:<id>"); absent for custom items
    #[serde(default)]
    pub product: Option<String>,
    pub name: String,
    /// Server-derived unit price at checkout time
    pub price: i64,
    pub size: String,
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub customization: Option<Customization>,
}

/// Delivery address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub phone: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "IN".to_string()
}

/// Shipping block on an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub address: Address,
    #[serde(default)]
    pub courier: Option<String>,
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default)]
    pub label_url: Option<String>,
    /// Partner-quoted rate in whole currency units
    #[serde(default)]
    pub rate: Option<i64>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    /// Human-facing order number, e.g. "ORD-4F2A91C3"
    pub order_number: String,
    /// Owning user reference ("user:<id>"); absent for guest orders
    #[serde(default)]
    pub user: Option<String>,
    pub email: String,
    pub items: Vec<OrderItem>,
    pub subtotal: i64,
    pub shipping_cost: i64,
    pub quantity_discount: i64,
    pub coupon_discount: i64,
    pub reward_discount: i64,
    /// Final amount in whole currency units
    pub amount: i64,
    #[serde(default)]
    pub coupon_code: Option<String>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub gateway_order_id: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub points_used: i64,
    #[serde(default)]
    pub points_earned: i64,
    pub shipping: ShippingInfo,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Admin status-change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::PaymentFailed));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Processing));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::PaymentFailed.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_payable() {
        assert!(OrderStatus::Pending.is_payable());
        assert!(!OrderStatus::Processing.is_payable());
        assert!(!OrderStatus::Cancelled.is_payable());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::PaymentFailed).unwrap(),
            "\"payment_failed\""
        );
        let s: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(s, OrderStatus::Shipped);
    }
}
