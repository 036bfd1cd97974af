//! AOV API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::StoreSettingsUpdate;
use crate::db::repository::SettingsRepository;
use crate::pricing;
use crate::utils::validation::validate_amount;
use shared::checkout::{DiscountTier, QuantityDiscountPreview, QuantityDiscountRequest};
use shared::{AppError, AppResult};

/// POST /api/aov/quantity-discount - preview the discount for a cart
///
/// Lines carry client prices because this runs pre-checkout for display;
/// the reconciliation path re-derives everything from the database.
pub async fn quantity_discount(
    State(state): State<ServerState>,
    Json(payload): Json<QuantityDiscountRequest>,
) -> AppResult<Json<QuantityDiscountPreview>> {
    let mut subtotal: i64 = 0;
    let mut total_quantity: i64 = 0;
    for line in &payload.items {
        validate_amount(line.price, "price")?;
        if line.quantity < 0 {
            return Err(AppError::validation("quantity must be non-negative"));
        }
        subtotal += line.price * line.quantity;
        total_quantity += line.quantity;
    }

    let settings = SettingsRepository::new(state.db.clone()).get().await?;
    let outcome = pricing::evaluate(&settings.discount_tiers, subtotal, total_quantity);

    Ok(Json(QuantityDiscountPreview {
        total_quantity,
        subtotal,
        discount: outcome.discount,
        discount_percent: outcome.percent,
        applied_tier: outcome.applied,
        next_tier: outcome.next,
    }))
}

/// GET /api/aov/quantity-discounts - the configured tier table
pub async fn list_tiers(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<DiscountTier>>> {
    let settings = SettingsRepository::new(state.db.clone()).get().await?;
    Ok(Json(settings.discount_tiers))
}

/// PUT /api/aov/quantity-discounts - replace the tier table (admin)
pub async fn update_tiers(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(tiers): Json<Vec<DiscountTier>>,
) -> AppResult<Json<Vec<DiscountTier>>> {
    user.require_admin()?;
    validate_tiers(&tiers)?;

    let settings = SettingsRepository::new(state.db.clone())
        .update(StoreSettingsUpdate {
            discount_tiers: Some(tiers),
            free_shipping_threshold: None,
            shipping_flat_fee: None,
            reward_redeem_rate: None,
            reward_earn_divisor: None,
            custom_base_price: None,
            custom_placement_fees: None,
        })
        .await?;
    Ok(Json(settings.discount_tiers))
}

fn validate_tiers(tiers: &[DiscountTier]) -> AppResult<()> {
    let mut last_min = 0;
    for tier in tiers {
        if tier.min_quantity < 1 {
            return Err(AppError::validation("min_quantity must be at least 1"));
        }
        if tier.min_quantity <= last_min {
            return Err(AppError::validation(
                "tiers must have strictly increasing min_quantity",
            ));
        }
        if tier.discount_percent == 0 || tier.discount_percent > 100 {
            return Err(AppError::validation(
                "discount_percent must be between 1 and 100",
            ));
        }
        last_min = tier.min_quantity;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(min_quantity: i64, discount_percent: u32) -> DiscountTier {
        DiscountTier {
            min_quantity,
            discount_percent,
        }
    }

    #[test]
    fn test_validate_tiers_accepts_ascending() {
        assert!(validate_tiers(&[tier(3, 10), tier(5, 20)]).is_ok());
        assert!(validate_tiers(&[]).is_ok());
    }

    #[test]
    fn test_validate_tiers_rejects_bad_tables() {
        assert!(validate_tiers(&[tier(0, 10)]).is_err());
        assert!(validate_tiers(&[tier(3, 10), tier(3, 20)]).is_err());
        assert!(validate_tiers(&[tier(5, 20), tier(3, 10)]).is_err());
        assert!(validate_tiers(&[tier(3, 0)]).is_err());
        assert!(validate_tiers(&[tier(3, 101)]).is_err());
    }
}
