//! Auth API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::{AuthResponse, LoginRequest, RegisterRequest, Role, User, UserPublic};
use crate::db::repository::UserRepository;
use crate::utils::time::now_millis;
use shared::{AppError, AppResult, ErrorCode};

/// POST /api/auth/register - create a customer account
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = UserRepository::new(state.db.clone());
    let email = payload.email.trim().to_lowercase();

    if repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailExists).with_detail("email", email));
    }

    let user = User {
        id: None,
        username: payload.username,
        email,
        password_hash: hash_password(&payload.password)?,
        role: Role::Customer,
        points_balance: 0,
        is_active: true,
        created_at: now_millis(),
    };
    let user = repo.create(user).await?;

    let token = state
        .jwt_service
        .generate_token(&user.id_str(), &user.email, "customer")
        .map_err(|e| AppError::internal(format!("token generation failed: {e}")))?;

    tracing::info!(user = %user.id_str(), "User registered");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/login - authenticate and issue a token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }
    if !verify_password(&payload.password, &user.password_hash) {
        tracing::warn!(email = %user.email, "Login failed: wrong password");
        return Err(AppError::invalid_credentials());
    }

    let role = match user.role {
        Role::Admin => "admin",
        Role::Customer => "customer",
    };
    let token = state
        .jwt_service
        .generate_token(&user.id_str(), &user.email, role)
        .map_err(|e| AppError::internal(format!("token generation failed: {e}")))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/me - profile of the authenticated user
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserPublic>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(user.into()))
}
