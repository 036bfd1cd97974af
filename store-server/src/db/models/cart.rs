//! Cart Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use shared::checkout::Customization;
use surrealdb::sql::Thing;

/// Cart item entity
///
/// Owned by exactly one user's cart. `product` is a product reference
/// ("product:<id>") or the literal "custom" for made-to-order items; `name`
/// and `price` are snapshots taken at add time and re-derived at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    /// Owning user reference ("user:<id>")
    pub user: String,
    pub product: String,
    pub name: String,
    pub price: i64,
    pub size: String,
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub customization: Option<Customization>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemCreate {
    pub product: String,
    pub size: String,
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub customization: Option<Customization>,
}

/// Quantity-change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemUpdate {
    pub quantity: i64,
}

/// Guest cart merged into the user cart at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartMergeRequest {
    pub items: Vec<CartItemCreate>,
}
