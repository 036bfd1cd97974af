//! Review Repository

use super::{BaseRepository, RepoError, RepoResult, merge_value, strip_table_prefix};
use crate::db::models::{Review, ReviewUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const REVIEW_TABLE: &str = "review";

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Reviews for a product, newest first
    pub async fn find_by_product(&self, product: &str) -> RepoResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review WHERE product = $product ORDER BY created_at DESC")
            .bind(("product", product.to_string()))
            .await?
            .take(0)?;
        Ok(reviews)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Review>> {
        let key = strip_table_prefix(REVIEW_TABLE, id).to_string();
        let review: Option<Review> = self.base.db().select((REVIEW_TABLE, key)).await?;
        Ok(review)
    }

    /// The one review a user wrote for a product, if any
    pub async fn find_by_user_and_product(
        &self,
        user: &str,
        product: &str,
    ) -> RepoResult<Option<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review WHERE user = $user AND product = $product")
            .bind(("user", user.to_string()))
            .bind(("product", product.to_string()))
            .await?
            .take(0)?;
        Ok(reviews.into_iter().next())
    }

    pub async fn create(&self, review: Review) -> RepoResult<Review> {
        let created: Option<Review> = self.base.db().create(REVIEW_TABLE).content(review).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    pub async fn update(&self, id: &str, data: ReviewUpdate) -> RepoResult<Review> {
        let key = strip_table_prefix(REVIEW_TABLE, id).to_string();
        let updated: Option<Review> = self
            .base
            .db()
            .update((REVIEW_TABLE, key))
            .merge(merge_value(&data))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(REVIEW_TABLE, id).to_string();
        let deleted: Option<Review> = self.base.db().delete((REVIEW_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Review {} not found", id)));
        }
        Ok(())
    }
}
