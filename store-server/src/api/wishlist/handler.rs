//! Wishlist API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Product;
use crate::db::repository::{ProductRepository, RepoError, WishlistRepository};
use shared::{AppError, AppResult, ErrorCode};

/// GET /api/wishlist - the user's wishlist, resolved to products
///
/// Entries whose product has since been removed are silently dropped.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let wishlist = WishlistRepository::new(state.db.clone());
    let products = ProductRepository::new(state.db.clone());

    let entries = wishlist.find_by_user(&user.id).await?;
    let mut resolved = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(product) = products.find_by_id(&entry.product).await?
            && product.is_active
        {
            resolved.push(product);
        }
    }
    Ok(Json(resolved))
}

/// POST /api/wishlist/{product_id} - add a product
pub async fn add(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(product_id): Path<String>,
) -> AppResult<Json<bool>> {
    let products = ProductRepository::new(state.db.clone());
    let product = products
        .find_by_id(&product_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", product_id),
            )
        })?;
    let product_ref = product
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();

    let wishlist = WishlistRepository::new(state.db.clone());
    wishlist.add(&user.id, &product_ref).await?;
    Ok(Json(true))
}

/// DELETE /api/wishlist/{product_id} - remove a product
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(product_id): Path<String>,
) -> AppResult<Json<bool>> {
    let product_ref = if product_id.starts_with("product:") {
        product_id.clone()
    } else {
        format!("product:{product_id}")
    };

    let wishlist = WishlistRepository::new(state.db.clone());
    match wishlist.remove(&user.id, &product_ref).await {
        Ok(()) => Ok(Json(true)),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::WishlistItemNotFound)),
        Err(e) => Err(e.into()),
    }
}
