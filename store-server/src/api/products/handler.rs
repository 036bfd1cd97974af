//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::db::repository::product::ProductFilter;
use crate::utils::validation::{MAX_NAME_LEN, validate_amount, validate_required_text};
use shared::{AppError, AppResult, ErrorCode};

/// Catalog listing query params
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub gender: Option<String>,
    pub tag: Option<String>,
}

/// GET /api/products - list active products
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let filter = ProductFilter {
        category: params.category,
        gender: params.gender,
        tag: params.tag,
    };
    let products = repo.find_all(&filter).await?;
    Ok(Json(products))
}

/// GET /api/products/by-category/{category_id} - products in one category
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_by_category(&category_id).await?;
    Ok(Json(products))
}

/// GET /api/products/{id} - single product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
    })?;
    Ok(Json(product))
}

/// POST /api/products - create product (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    user.require_admin()?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_amount(payload.price, "price")?;
    if let Some(mrp) = payload.mrp {
        validate_amount(mrp, "mrp")?;
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;
    Ok(Json(product))
}

/// PUT /api/products/{id} - update product (admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    user.require_admin()?;
    if let Some(price) = payload.price {
        validate_amount(price, "price")?;
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id} - soft-delete product (admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    user.require_admin()?;
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(true))
}
