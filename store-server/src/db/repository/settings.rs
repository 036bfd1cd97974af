//! Settings Repository
//!
//! The store settings live in the single record `settings:store`; reads fall
//! back to compiled defaults until an admin writes them.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{StoreSettings, StoreSettingsUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SETTINGS_TABLE: &str = "settings";
const SETTINGS_KEY: &str = "store";

#[derive(Clone)]
pub struct SettingsRepository {
    base: BaseRepository,
}

impl SettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Current settings, or defaults when none are stored yet
    pub async fn get(&self) -> RepoResult<StoreSettings> {
        let settings: Option<StoreSettings> = self
            .base
            .db()
            .select((SETTINGS_TABLE, SETTINGS_KEY))
            .await?;
        Ok(settings.unwrap_or_default())
    }

    /// Apply a partial update and return the stored settings
    pub async fn update(&self, data: StoreSettingsUpdate) -> RepoResult<StoreSettings> {
        let mut settings = self.get().await?;

        if let Some(mut tiers) = data.discount_tiers {
            tiers.sort_by_key(|t| t.min_quantity);
            settings.discount_tiers = tiers;
        }
        if let Some(v) = data.free_shipping_threshold {
            settings.free_shipping_threshold = v;
        }
        if let Some(v) = data.shipping_flat_fee {
            settings.shipping_flat_fee = v;
        }
        if let Some(v) = data.reward_redeem_rate {
            settings.reward_redeem_rate = v;
        }
        if let Some(v) = data.reward_earn_divisor {
            settings.reward_earn_divisor = v;
        }
        if let Some(v) = data.custom_base_price {
            settings.custom_base_price = v;
        }
        if let Some(v) = data.custom_placement_fees {
            settings.custom_placement_fees = v;
        }

        let stored: Option<StoreSettings> = self
            .base
            .db()
            .upsert((SETTINGS_TABLE, SETTINGS_KEY))
            .content(settings)
            .await?;
        stored.ok_or_else(|| RepoError::Database("Failed to store settings".to_string()))
    }
}
