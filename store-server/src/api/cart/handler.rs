//! Cart API Handlers
//!
//! Quantity checks here are read-time conveniences; the conditional stock
//! decrement at order creation is what actually prevents overselling.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::cart::check_availability;
use crate::checkout::custom_item_price;
use crate::core::ServerState;
use crate::db::models::{CartItem, CartItemCreate, CartItemUpdate, CartMergeRequest, Size};
use crate::db::repository::{CartRepository, ProductRepository, SettingsRepository};
use crate::utils::time::now_millis;
use crate::utils::validation::validate_quantity;
use shared::checkout::CUSTOM_PRODUCT;
use shared::{AppError, AppResult, ErrorCode};

/// GET /api/cart - the user's cart
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<CartItem>>> {
    let repo = CartRepository::new(state.db.clone());
    let items = repo.find_by_user(&user.id).await?;
    Ok(Json(items))
}

/// POST /api/cart/items - add an item
///
/// Adding an existing product+size again raises that line's quantity instead
/// of creating a second line.
pub async fn add_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CartItemCreate>,
) -> AppResult<Json<CartItem>> {
    let item = add_line(&state, &user.id, payload).await?;
    Ok(Json(item))
}

/// PUT /api/cart/items/{id} - change quantity
pub async fn update_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CartItemUpdate>,
) -> AppResult<Json<CartItem>> {
    validate_quantity(payload.quantity)?;

    let cart = CartRepository::new(state.db.clone());
    let item = cart
        .find_by_id(&id)
        .await?
        .filter(|item| item.user == user.id)
        .ok_or_else(|| AppError::new(ErrorCode::CartItemNotFound))?;

    if !item.is_custom {
        let products = ProductRepository::new(state.db.clone());
        let product = products
            .find_by_id(&item.product)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ProductNotFound,
                    format!("Product {} not found", item.product),
                )
            })?;
        let size = parse_size(&item.size)?;
        let existing = cart.find_by_user(&user.id).await?;
        let item_id = item.id.as_ref().map(|t| t.to_string());
        check_availability(
            &product,
            size,
            payload.quantity,
            &existing,
            item_id.as_deref(),
        )?;
    }

    let updated = cart.update_quantity(&id, payload.quantity).await?;
    Ok(Json(updated))
}

/// DELETE /api/cart/items/{id} - remove an item
pub async fn remove_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let cart = CartRepository::new(state.db.clone());
    let owned = cart
        .find_by_id(&id)
        .await?
        .filter(|item| item.user == user.id)
        .is_some();
    if !owned {
        return Err(AppError::new(ErrorCode::CartItemNotFound));
    }
    cart.delete(&id).await?;
    Ok(Json(true))
}

/// DELETE /api/cart - clear the cart
pub async fn clear(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<bool>> {
    let cart = CartRepository::new(state.db.clone());
    cart.clear_user(&user.id).await?;
    Ok(Json(true))
}

/// Guest-cart merge response
#[derive(Debug, Serialize)]
pub struct MergeResponse {
    pub items: Vec<CartItem>,
    /// Lines dropped because stock no longer covers them
    pub skipped: Vec<String>,
}

/// POST /api/cart/merge - fold a guest cart into the user cart at login
///
/// Best-effort: lines the current stock cannot cover are reported back
/// rather than failing the whole merge.
pub async fn merge(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CartMergeRequest>,
) -> AppResult<Json<MergeResponse>> {
    let mut skipped = Vec::new();

    for line in payload.items {
        let label = format!("{} ({})", line.product, line.size);
        match add_line(&state, &user.id, line).await {
            Ok(_) => {}
            Err(e)
                if matches!(
                    e.code,
                    ErrorCode::InsufficientStock
                        | ErrorCode::SizeUnavailable
                        | ErrorCode::ProductNotFound
                        | ErrorCode::ProductInactive
                ) =>
            {
                tracing::info!(line = %label, code = %e.code, "Skipped line during cart merge");
                skipped.push(label);
            }
            Err(e) => return Err(e),
        }
    }

    let cart = CartRepository::new(state.db.clone());
    let items = cart.find_by_user(&user.id).await?;
    Ok(Json(MergeResponse { items, skipped }))
}

/// Shared add-to-cart path for both the add endpoint and guest merge
async fn add_line(
    state: &ServerState,
    user: &str,
    payload: CartItemCreate,
) -> AppResult<CartItem> {
    validate_quantity(payload.quantity)?;

    let cart = CartRepository::new(state.db.clone());
    let now = now_millis();

    if payload.product == CUSTOM_PRODUCT {
        let customization = payload
            .customization
            .ok_or_else(|| AppError::validation("custom items require customization details"))?;
        let settings = SettingsRepository::new(state.db.clone()).get().await?;
        let price = custom_item_price(&settings, &customization.placements)?;

        let item = CartItem {
            id: None,
            user: user.to_string(),
            product: CUSTOM_PRODUCT.to_string(),
            name: "Custom print".to_string(),
            price,
            size: payload.size,
            color: payload.color,
            quantity: payload.quantity,
            is_custom: true,
            customization: Some(customization),
            created_at: now,
            updated_at: now,
        };
        return Ok(cart.create(item).await?);
    }

    let products = ProductRepository::new(state.db.clone());
    let product = products
        .find_by_id(&payload.product)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", payload.product),
            )
        })?;
    let size = parse_size(&payload.size)?;
    let product_ref = product
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();

    let existing = cart.find_by_user(user).await?;
    let same_line = existing
        .iter()
        .find(|item| !item.is_custom && item.product == product_ref && item.size == size.label())
        .cloned();

    match same_line {
        Some(line) => {
            let new_quantity = line.quantity + payload.quantity;
            validate_quantity(new_quantity)?;
            let line_id = line.id.as_ref().map(|t| t.to_string());
            check_availability(&product, size, new_quantity, &existing, line_id.as_deref())?;
            let id = line_id.ok_or_else(|| AppError::internal("cart item missing id"))?;
            Ok(cart.update_quantity(&id, new_quantity).await?)
        }
        None => {
            check_availability(&product, size, payload.quantity, &existing, None)?;
            let item = CartItem {
                id: None,
                user: user.to_string(),
                product: product_ref,
                name: product.name.clone(),
                price: product.price,
                size: size.label().to_string(),
                color: payload.color,
                quantity: payload.quantity,
                is_custom: false,
                customization: None,
                created_at: now,
                updated_at: now,
            };
            Ok(cart.create(item).await?)
        }
    }
}

fn parse_size(size: &str) -> AppResult<Size> {
    size.parse::<Size>()
        .map_err(|_| AppError::validation(format!("invalid size: {size}")))
}
