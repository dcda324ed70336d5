use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::auth::jwt::sign_token;
use crate::dtos::user::{
    LoginRequest, LoginResponse, PromoteRequest, RegisterUserRequest, UserResponse,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

// POST /users/register - Create an account and log it in
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    let user = state
        .identity
        .register(&payload.username, &payload.password)
        .await?;
    let token = sign_token(&user.username, user.is_admin, &state.config.jwt_secret)?;

    // 8 hours = 28800 seconds
    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            access_token: token,
            token_type: "Bearer",
            expires_in_seconds: 8 * 60 * 60,
        }),
    ))
}

// POST /users/login - Verify credentials and issue a token
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::validation("Username required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let user = state
        .identity
        .verify_login(&payload.username, &payload.password)
        .await?;
    let token = sign_token(&user.username, user.is_admin, &state.config.jwt_secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: 8 * 60 * 60,
    }))
}

// GET /users/me - Current account from the database
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.identity.fetch_user(&auth.username).await?;
    Ok(Json(UserResponse::from(user)))
}

// DELETE /users/me - Self-service account deletion
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<()>, AppError> {
    state.identity.delete_user(&auth.username).await?;
    Ok(Json(()))
}

// POST /admin/promote - Grant the admin flag to another user
pub async fn promote_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<PromoteRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .identity
        .promote_to_admin(&auth.username, &payload.username)
        .await?;
    Ok(Json(UserResponse::from(user)))
}

// DELETE /admin/users/{username} - Remove any account
pub async fn delete_user_admin(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(username): Path<String>,
) -> Result<Json<()>, AppError> {
    let actor = state.identity.fetch_user(&auth.username).await?;
    if !actor.is_admin {
        return Err(AppError::access_denied("Admin privileges required"));
    }
    state.identity.delete_user(&username).await?;
    Ok(Json(()))
}
