//! Size Chart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{SizeChart, SizeChartCreate, SizeChartUpdate};
use crate::db::repository::SizeChartRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use shared::{AppError, AppResult, ErrorCode};

/// GET /api/size-charts - list size charts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SizeChart>>> {
    let repo = SizeChartRepository::new(state.db.clone());
    let charts = repo.find_all().await?;
    Ok(Json(charts))
}

/// GET /api/size-charts/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SizeChart>> {
    let repo = SizeChartRepository::new(state.db.clone());
    let chart = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::SizeChartNotFound,
            format!("Size chart {} not found", id),
        )
    })?;
    Ok(Json(chart))
}

/// POST /api/size-charts - create size chart (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<SizeChartCreate>,
) -> AppResult<Json<SizeChart>> {
    user.require_admin()?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if payload
        .rows
        .iter()
        .any(|row| row.len() != payload.headers.len())
    {
        return Err(AppError::validation(
            "every row must have one value per header",
        ));
    }

    let repo = SizeChartRepository::new(state.db.clone());
    let chart = repo.create(payload).await?;
    Ok(Json(chart))
}

/// PUT /api/size-charts/{id} - update size chart (admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<SizeChartUpdate>,
) -> AppResult<Json<SizeChart>> {
    user.require_admin()?;
    let repo = SizeChartRepository::new(state.db.clone());
    let chart = repo.update(&id, payload).await?;
    Ok(Json(chart))
}

/// DELETE /api/size-charts/{id} - delete size chart (admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    user.require_admin()?;
    let repo = SizeChartRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(true))
}
