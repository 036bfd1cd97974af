//! Coupon API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::checkout::coupon_discount;
use crate::core::ServerState;
use crate::db::models::{Coupon, CouponCreate, CouponUpdate, CouponValidateRequest, DiscountType};
use crate::db::repository::{CouponRepository, RepoError};
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_NAME_LEN, validate_amount, validate_required_text};
use shared::{AppError, AppResult, ErrorCode};

/// GET /api/coupons - list coupons (admin)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Coupon>>> {
    user.require_admin()?;
    let repo = CouponRepository::new(state.db.clone());
    let coupons = repo.find_all().await?;
    Ok(Json(coupons))
}

/// GET /api/coupons/{id} (admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Coupon>> {
    user.require_admin()?;
    let repo = CouponRepository::new(state.db.clone());
    let coupon = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::CouponNotFound, format!("Coupon {} not found", id))
    })?;
    Ok(Json(coupon))
}

/// POST /api/coupons - create coupon (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CouponCreate>,
) -> AppResult<Json<Coupon>> {
    user.require_admin()?;
    validate_required_text(&payload.code, "code", MAX_NAME_LEN)?;
    validate_coupon_value(payload.discount_type, payload.discount_value)?;
    if let Some(max) = payload.max_discount {
        validate_amount(max, "max_discount")?;
    }

    let repo = CouponRepository::new(state.db.clone());
    match repo.create(payload).await {
        Ok(coupon) => Ok(Json(coupon)),
        Err(RepoError::Duplicate(_)) => Err(AppError::new(ErrorCode::CouponCodeExists)),
        Err(e) => Err(e.into()),
    }
}

/// PUT /api/coupons/{id} - update coupon (admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<Json<Coupon>> {
    user.require_admin()?;
    if let (Some(discount_type), Some(value)) = (payload.discount_type, payload.discount_value) {
        validate_coupon_value(discount_type, value)?;
    }

    let repo = CouponRepository::new(state.db.clone());
    let coupon = repo.update(&id, payload).await?;
    Ok(Json(coupon))
}

/// DELETE /api/coupons/{id} - delete coupon (admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    user.require_admin()?;
    let repo = CouponRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(true))
}

/// Coupon validation result
#[derive(Debug, Serialize)]
pub struct CouponValidation {
    pub code: String,
    pub discount: i64,
}

/// POST /api/coupons/validate - check a code against a subtotal (public)
pub async fn validate(
    State(state): State<ServerState>,
    Json(payload): Json<CouponValidateRequest>,
) -> AppResult<Json<CouponValidation>> {
    validate_amount(payload.subtotal, "subtotal")?;

    let repo = CouponRepository::new(state.db.clone());
    let coupon = repo.find_by_code(&payload.code).await?.ok_or_else(|| {
        AppError::new(ErrorCode::CouponNotFound).with_detail("code", payload.code.clone())
    })?;

    let discount = coupon_discount(&coupon, payload.subtotal, now_millis())?;
    Ok(Json(CouponValidation {
        code: coupon.code,
        discount,
    }))
}

fn validate_coupon_value(discount_type: DiscountType, value: i64) -> AppResult<()> {
    match discount_type {
        DiscountType::Percentage => {
            if !(1..=100).contains(&value) {
                return Err(AppError::validation(
                    "percentage discount must be between 1 and 100",
                ));
            }
        }
        DiscountType::Fixed => {
            if value <= 0 {
                return Err(AppError::validation("fixed discount must be positive"));
            }
        }
    }
    Ok(())
}
