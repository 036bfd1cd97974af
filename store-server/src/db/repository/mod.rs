//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables.

pub mod cart;
pub mod category;
pub mod coupon;
pub mod order;
pub mod product;
pub mod review;
pub mod settings;
pub mod size_chart;
pub mod user;
pub mod wishlist;

pub use cart::CartRepository;
pub use category::{CategoryRepository, ProductTypeRepository};
pub use coupon::CouponRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use review::ReviewRepository;
pub use settings::SettingsRepository;
pub use size_chart::SizeChartRepository;
pub use user::UserRepository;
pub use wishlist::WishlistRepository;

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let text = err.to_string();
        // Unique index violations surface as plain query errors
        if text.contains("already contains") {
            RepoError::Duplicate(text)
        } else {
            RepoError::Database(text)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for shared::AppError {
    fn from(err: RepoError) -> Self {
        use shared::{AppError, ErrorCode};
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::InsufficientStock(product) => {
                AppError::new(ErrorCode::InsufficientStock).with_detail("product", product)
            }
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

// =============================================================================
// ID Convention: "table:id" strings everywhere above the repository layer
// =============================================================================
//
// - Record ids serialize as "table:id" via models::serde_thing
// - References between records are stored as those strings
// - Repositories accept either form and strip the prefix for keyed access

/// Strip a "table:" prefix from an id, if present
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Serialize an update payload into a merge map, dropping unset fields
pub fn merge_value<T: Serialize>(data: &T) -> serde_json::Value {
    match serde_json::to_value(data) {
        Ok(serde_json::Value::Object(map)) => serde_json::Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .collect(),
        ),
        Ok(other) => other,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize update payload");
            serde_json::Value::Object(serde_json::Map::new())
        }
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_table_prefix() {
        assert_eq!(strip_table_prefix("product", "product:abc"), "abc");
        assert_eq!(strip_table_prefix("product", "abc"), "abc");
        // Only the matching table prefix is stripped
        assert_eq!(
            strip_table_prefix("product", "category:abc"),
            "category:abc"
        );
    }

    #[test]
    fn test_merge_value_drops_nulls() {
        #[derive(Serialize)]
        struct Update {
            name: Option<String>,
            price: Option<i64>,
        }

        let v = merge_value(&Update {
            name: Some("Tee".into()),
            price: None,
        });
        let obj = v.as_object().unwrap();
        assert!(obj.contains_key("name"));
        assert!(!obj.contains_key("price"));
    }
}
