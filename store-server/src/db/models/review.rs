//! Review Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// Product review entity, one per user+product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    /// Product reference ("product:<id>")
    pub product: String,
    /// Author reference ("user:<id>")
    pub user: String,
    /// Author display name, denormalized for listing
    pub username: String,
    /// 1..=5
    pub rating: i32,
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub product: String,
    pub rating: i32,
    pub title: Option<String>,
    pub body: String,
}

/// Update review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
}
