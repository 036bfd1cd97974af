//! Review API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Review, ReviewCreate, ReviewUpdate};
use crate::db::repository::{ProductRepository, ReviewRepository, UserRepository};
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use shared::{AppError, AppResult, ErrorCode};

/// GET /api/reviews/product/{product_id} - reviews for a product (public)
pub async fn list_for_product(
    State(state): State<ServerState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Vec<Review>>> {
    let repo = ReviewRepository::new(state.db.clone());
    let product_ref = normalize_product_ref(&product_id);
    let reviews = repo.find_by_product(&product_ref).await?;
    Ok(Json(reviews))
}

/// POST /api/reviews - write a review, one per user+product
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<Json<Review>> {
    validate_rating(payload.rating)?;
    validate_required_text(&payload.body, "body", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.title, "title", MAX_NOTE_LEN)?;

    let product_ref = normalize_product_ref(&payload.product);
    let products = ProductRepository::new(state.db.clone());
    let product = products
        .find_by_id(&product_ref)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", payload.product),
            )
        })?;

    let repo = ReviewRepository::new(state.db.clone());
    if repo
        .find_by_user_and_product(&user.id, &product_ref)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::ReviewExists)
            .with_detail("product", product.name.clone()));
    }

    let users = UserRepository::new(state.db.clone());
    let username = users
        .find_by_id(&user.id)
        .await?
        .map(|u| u.username)
        .unwrap_or_else(|| "customer".to_string());

    let review = Review {
        id: None,
        product: product_ref,
        user: user.id.clone(),
        username,
        rating: payload.rating,
        title: payload.title,
        body: payload.body,
        created_at: now_millis(),
    };
    let review = repo.create(review).await?;
    Ok(Json(review))
}

/// PUT /api/reviews/{id} - edit own review
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReviewUpdate>,
) -> AppResult<Json<Review>> {
    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
    }
    validate_optional_text(&payload.body, "body", MAX_NOTE_LEN)?;

    let repo = ReviewRepository::new(state.db.clone());
    let review = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| review_not_found(&id))?;
    if review.user != user.id {
        return Err(review_not_found(&id));
    }

    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/reviews/{id} - delete own review (admins may delete any)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| review_not_found(&id))?;
    if review.user != user.id && !user.is_admin() {
        return Err(review_not_found(&id));
    }

    repo.delete(&id).await?;
    Ok(Json(true))
}

fn validate_rating(rating: i32) -> AppResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::validation("rating must be between 1 and 5"));
    }
    Ok(())
}

fn normalize_product_ref(id: &str) -> String {
    if id.starts_with("product:") {
        id.to_string()
    } else {
        format!("product:{id}")
    }
}

fn review_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::ReviewNotFound, format!("Review {} not found", id))
}
