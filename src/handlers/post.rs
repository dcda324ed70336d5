use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;

use crate::dtos::post::{CreatePostRequest, PostResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

// POST /posts - Append a post to the caller's feed
pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let post = state
        .profiles
        .add_post(&auth.username, &payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

// GET /posts - The caller's posts, oldest first
pub async fn list_posts(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.profiles.posts_for(&auth.username).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}
