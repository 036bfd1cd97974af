//! Wishlist Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::WishlistItem;
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const WISHLIST_TABLE: &str = "wishlist_item";

#[derive(Clone)]
pub struct WishlistRepository {
    base: BaseRepository,
}

impl WishlistRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Wishlist entries for a user, newest first
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Vec<WishlistItem>> {
        let items: Vec<WishlistItem> = self
            .base
            .db()
            .query("SELECT * FROM wishlist_item WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Add a product to the wishlist (no-op when already present)
    pub async fn add(&self, user: &str, product: &str) -> RepoResult<WishlistItem> {
        if let Some(existing) = self.find(user, product).await? {
            return Ok(existing);
        }
        let item = WishlistItem {
            id: None,
            user: user.to_string(),
            product: product.to_string(),
            created_at: now_millis(),
        };
        let created: Option<WishlistItem> =
            self.base.db().create(WISHLIST_TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to add wishlist item".to_string()))
    }

    /// Remove a product from the wishlist
    pub async fn remove(&self, user: &str, product: &str) -> RepoResult<()> {
        let existing = self.find(user, product).await?;
        match existing.and_then(|i| i.id) {
            Some(id) => {
                let _: Option<WishlistItem> = self
                    .base
                    .db()
                    .delete((WISHLIST_TABLE, id.id.to_string()))
                    .await?;
                Ok(())
            }
            None => Err(RepoError::NotFound(format!(
                "Wishlist entry for {} not found",
                product
            ))),
        }
    }

    async fn find(&self, user: &str, product: &str) -> RepoResult<Option<WishlistItem>> {
        let items: Vec<WishlistItem> = self
            .base
            .db()
            .query("SELECT * FROM wishlist_item WHERE user = $user AND product = $product")
            .bind(("user", user.to_string()))
            .bind(("product", product.to_string()))
            .await?
            .take(0)?;
        Ok(items.into_iter().next())
    }
}
