//! Cart Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::CartItem;
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CART_TABLE: &str = "cart_item";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All cart items belonging to a user
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Vec<CartItem>> {
        let items: Vec<CartItem> = self
            .base
            .db()
            .query("SELECT * FROM cart_item WHERE user = $user ORDER BY created_at")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CartItem>> {
        let key = strip_table_prefix(CART_TABLE, id).to_string();
        let item: Option<CartItem> = self.base.db().select((CART_TABLE, key)).await?;
        Ok(item)
    }

    pub async fn create(&self, item: CartItem) -> RepoResult<CartItem> {
        let created: Option<CartItem> = self.base.db().create(CART_TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cart item".to_string()))
    }

    pub async fn update_quantity(&self, id: &str, quantity: i64) -> RepoResult<CartItem> {
        let key = strip_table_prefix(CART_TABLE, id).to_string();
        let updated: Option<CartItem> = self
            .base
            .db()
            .update((CART_TABLE, key))
            .merge(serde_json::json!({ "quantity": quantity, "updated_at": now_millis() }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Cart item {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(CART_TABLE, id).to_string();
        let deleted: Option<CartItem> = self.base.db().delete((CART_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Cart item {} not found", id)));
        }
        Ok(())
    }

    /// Remove every cart item belonging to a user
    pub async fn clear_user(&self, user: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE cart_item WHERE user = $user")
            .bind(("user", user.to_string()))
            .await?
            .check()
            .map_err(RepoError::from)?;
        Ok(())
    }
}
