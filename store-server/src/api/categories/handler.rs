//! Category and ProductType API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    Category, CategoryCreate, CategoryUpdate, ProductType, ProductTypeCreate, ProductTypeUpdate,
};
use crate::db::repository::{CategoryRepository, ProductTypeRepository, RepoError};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use shared::{AppError, AppResult, ErrorCode};

// =============================================================================
// Categories
// =============================================================================

/// GET /api/categories - list active categories
pub async fn list_categories(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {} not found", id))
    })?;
    Ok(Json(category))
}

/// POST /api/categories - create category (admin)
pub async fn create_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    user.require_admin()?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = CategoryRepository::new(state.db.clone());
    match repo.create(payload).await {
        Ok(category) => Ok(Json(category)),
        Err(RepoError::Duplicate(_)) => Err(AppError::new(ErrorCode::CategoryNameExists)),
        Err(e) => Err(e.into()),
    }
}

/// PUT /api/categories/{id} - update category (admin)
pub async fn update_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    user.require_admin()?;
    let repo = CategoryRepository::new(state.db.clone());
    match repo.update(&id, payload).await {
        Ok(category) => Ok(Json(category)),
        Err(RepoError::Duplicate(_)) => Err(AppError::new(ErrorCode::CategoryNameExists)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/categories/{id} - delete category (admin)
pub async fn delete_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    user.require_admin()?;
    let repo = CategoryRepository::new(state.db.clone());
    match repo.delete(&id).await {
        Ok(()) => Ok(Json(true)),
        Err(RepoError::Validation(_)) => Err(AppError::new(ErrorCode::CategoryHasProducts)),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Product types
// =============================================================================

/// GET /api/product-types - list active product types
pub async fn list_product_types(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ProductType>>> {
    let repo = ProductTypeRepository::new(state.db.clone());
    let types = repo.find_all().await?;
    Ok(Json(types))
}

/// GET /api/product-types/{id}
pub async fn get_product_type(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductType>> {
    let repo = ProductTypeRepository::new(state.db.clone());
    let product_type = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::ProductTypeNotFound,
            format!("Product type {} not found", id),
        )
    })?;
    Ok(Json(product_type))
}

/// POST /api/product-types - create product type (admin)
pub async fn create_product_type(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductTypeCreate>,
) -> AppResult<Json<ProductType>> {
    user.require_admin()?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = ProductTypeRepository::new(state.db.clone());
    match repo.create(payload).await {
        Ok(product_type) => Ok(Json(product_type)),
        Err(RepoError::Duplicate(_)) => Err(AppError::new(ErrorCode::ProductTypeNameExists)),
        Err(e) => Err(e.into()),
    }
}

/// PUT /api/product-types/{id} - update product type (admin)
pub async fn update_product_type(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductTypeUpdate>,
) -> AppResult<Json<ProductType>> {
    user.require_admin()?;
    let repo = ProductTypeRepository::new(state.db.clone());
    let product_type = repo.update(&id, payload).await?;
    Ok(Json(product_type))
}

/// DELETE /api/product-types/{id} - delete product type (admin)
pub async fn delete_product_type(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    user.require_admin()?;
    let repo = ProductTypeRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(true))
}
