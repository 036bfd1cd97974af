//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) plus the repository layer.

pub mod models;
pub mod repository;

use shared::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "hemline";
const DATABASE: &str = "store";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `db_path` and apply schema definitions
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!(path = %db_path.display(), "Database connection established");

        Ok(Self { db })
    }
}

/// Apply idempotent schema definitions
///
/// Tables are schemaless; only the uniqueness constraints the business rules
/// depend on are declared.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    let statements = [
        "DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE",
        "DEFINE INDEX IF NOT EXISTS coupon_code ON TABLE coupon FIELDS code UNIQUE",
        "DEFINE INDEX IF NOT EXISTS category_name ON TABLE category FIELDS name UNIQUE",
        "DEFINE INDEX IF NOT EXISTS product_type_name ON TABLE product_type FIELDS name UNIQUE",
        "DEFINE INDEX IF NOT EXISTS review_user_product ON TABLE review FIELDS user, product UNIQUE",
        "DEFINE INDEX IF NOT EXISTS wishlist_user_product ON TABLE wishlist_item FIELDS user, product UNIQUE",
        "DEFINE INDEX IF NOT EXISTS order_gateway ON TABLE store_order FIELDS gateway_order_id",
        "DEFINE INDEX IF NOT EXISTS order_user ON TABLE store_order FIELDS user",
    ];

    for statement in statements {
        db.query(statement)
            .await
            .map_err(|e| AppError::database(format!("Schema definition failed: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Schema definition failed: {e}")))?;
    }

    tracing::info!("Database schema definitions applied");
    Ok(())
}
