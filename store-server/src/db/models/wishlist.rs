//! Wishlist Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// Wishlist entry, unique per user+product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    /// Owning user reference ("user:<id>")
    pub user: String,
    /// Product reference ("product:<id>")
    pub product: String,
    #[serde(default)]
    pub created_at: i64,
}
