//! Store Settings Model
//!
//! Single-record configuration for the discount and checkout math. The
//! server is the only source of truth for quantity tiers; clients never
//! carry fallback tables.

use serde::{Deserialize, Serialize};
use shared::checkout::DiscountTier;
use std::collections::BTreeMap;

/// Store-wide settings, persisted as the single record `settings:store`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Quantity discount tiers, ascending by `min_quantity`
    pub discount_tiers: Vec<DiscountTier>,
    /// Subtotals at or above this ship free
    pub free_shipping_threshold: i64,
    /// Flat shipping fee below the threshold
    pub shipping_flat_fee: i64,
    /// Currency units credited per redeemed reward point
    pub reward_redeem_rate: f64,
    /// One point earned per this many currency units paid
    pub reward_earn_divisor: i64,
    /// Base price of a made-to-order custom item
    pub custom_base_price: i64,
    /// Design fee per print placement ("front", "back", "sleeve")
    pub custom_placement_fees: BTreeMap<String, i64>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            discount_tiers: vec![
                DiscountTier {
                    min_quantity: 3,
                    discount_percent: 10,
                },
                DiscountTier {
                    min_quantity: 5,
                    discount_percent: 20,
                },
            ],
            free_shipping_threshold: 1000,
            shipping_flat_fee: 100,
            reward_redeem_rate: 0.5,
            reward_earn_divisor: 100,
            custom_base_price: 799,
            custom_placement_fees: BTreeMap::from([
                ("front".to_string(), 150),
                ("back".to_string(), 200),
                ("sleeve".to_string(), 100),
            ]),
        }
    }
}

/// Update settings payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettingsUpdate {
    pub discount_tiers: Option<Vec<DiscountTier>>,
    pub free_shipping_threshold: Option<i64>,
    pub shipping_flat_fee: Option<i64>,
    pub reward_redeem_rate: Option<f64>,
    pub reward_earn_divisor: Option<i64>,
    pub custom_base_price: Option<i64>,
    pub custom_placement_fees: Option<BTreeMap<String, i64>>,
}
