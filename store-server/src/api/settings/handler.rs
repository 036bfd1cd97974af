//! Store settings API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{StoreSettings, StoreSettingsUpdate};
use crate::db::repository::SettingsRepository;
use shared::{AppError, AppResult};

/// GET /api/settings - current store settings (admin)
pub async fn get_settings(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<StoreSettings>> {
    user.require_admin()?;
    let repo = SettingsRepository::new(state.db.clone());
    let settings = repo.get().await?;
    Ok(Json(settings))
}

/// PUT /api/settings - update store settings (admin)
pub async fn update_settings(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<StoreSettingsUpdate>,
) -> AppResult<Json<StoreSettings>> {
    user.require_admin()?;

    if let Some(threshold) = payload.free_shipping_threshold
        && threshold < 0
    {
        return Err(AppError::validation(
            "free_shipping_threshold must be non-negative",
        ));
    }
    if let Some(fee) = payload.shipping_flat_fee
        && fee < 0
    {
        return Err(AppError::validation("shipping_flat_fee must be non-negative"));
    }
    if let Some(rate) = payload.reward_redeem_rate
        && !(0.0..=100.0).contains(&rate)
    {
        return Err(AppError::validation(
            "reward_redeem_rate must be between 0 and 100",
        ));
    }

    let repo = SettingsRepository::new(state.db.clone());
    let settings = repo.update(payload).await?;
    Ok(Json(settings))
}
