//! Coupon Repository

use super::{BaseRepository, RepoError, RepoResult, merge_value, strip_table_prefix};
use crate::db::models::{Coupon, CouponCreate, CouponUpdate};
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const COUPON_TABLE: &str = "coupon";

#[derive(Clone)]
pub struct CouponRepository {
    base: BaseRepository,
}

impl CouponRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Coupon>> {
        let coupons: Vec<Coupon> = self
            .base
            .db()
            .query("SELECT * FROM coupon ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(coupons)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Coupon>> {
        let key = strip_table_prefix(COUPON_TABLE, id).to_string();
        let coupon: Option<Coupon> = self.base.db().select((COUPON_TABLE, key)).await?;
        Ok(coupon)
    }

    /// Find a coupon by its (case-insensitive) code
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Coupon>> {
        let coupons: Vec<Coupon> = self
            .base
            .db()
            .query("SELECT * FROM coupon WHERE code = $code")
            .bind(("code", code.trim().to_uppercase()))
            .await?
            .take(0)?;
        Ok(coupons.into_iter().next())
    }

    pub async fn create(&self, data: CouponCreate) -> RepoResult<Coupon> {
        let coupon = Coupon {
            id: None,
            code: data.code.trim().to_uppercase(),
            discount_type: data.discount_type,
            discount_value: data.discount_value,
            minimum_purchase: data.minimum_purchase.unwrap_or(0),
            max_discount: data.max_discount,
            valid_until: data.valid_until,
            is_active: true,
            created_at: now_millis(),
        };
        let created: Option<Coupon> =
            self.base.db().create(COUPON_TABLE).content(coupon).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create coupon".to_string()))
    }

    pub async fn update(&self, id: &str, data: CouponUpdate) -> RepoResult<Coupon> {
        let key = strip_table_prefix(COUPON_TABLE, id).to_string();
        let updated: Option<Coupon> = self
            .base
            .db()
            .update((COUPON_TABLE, key))
            .merge(merge_value(&data))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Coupon {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(COUPON_TABLE, id).to_string();
        let deleted: Option<Coupon> = self.base.db().delete((COUPON_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Coupon {} not found", id)));
        }
        Ok(())
    }
}
