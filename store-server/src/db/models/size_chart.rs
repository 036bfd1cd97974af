//! Size Chart Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// Size chart entity
///
/// Stored as a display matrix: one header row ("Size", "Chest", "Length", ...)
/// and one value row per size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeChart {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    pub name: String,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Create size chart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeChartCreate {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Update size chart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeChartUpdate {
    pub name: Option<String>,
    pub headers: Option<Vec<String>>,
    pub rows: Option<Vec<Vec<String>>>,
}
