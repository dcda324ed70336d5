use axum::extract::{Extension, Path, State};
use axum::Json;

use crate::dtos::post::PostResponse;
use crate::dtos::profile::{ProfileResponse, UpdateProfileRequest};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::store::profiles::ProfileField;

fn require_self(auth: &AuthContext, username: &str) -> Result<(), AppError> {
    if auth.username != username {
        return Err(AppError::access_denied(
            "You can only access your own profile",
        ));
    }
    Ok(())
}

// GET /profiles/{username} - Own profile with posts, files and active theme
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(username): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    require_self(&auth, &username)?;

    let profile = state.profiles.fetch_profile(&username).await?;
    let active_theme = state.themes.resolve_active_theme(&username).await?;
    let posts = state
        .profiles
        .posts_for(&username)
        .await?
        .into_iter()
        .map(PostResponse::from)
        .collect();
    let files = state.files.list_files(&username)?;

    Ok(Json(ProfileResponse {
        username: profile.username,
        bio: profile.bio,
        website: profile.website,
        theme: profile.theme,
        active_theme,
        posts,
        files,
    }))
}

// PUT /profiles/{username} - Update one profile field
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(username): Path<String>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<()>, AppError> {
    require_self(&auth, &username)?;

    if payload.field == "theme" {
        return Err(AppError::validation(
            "Use the theme routes to change the active theme",
        ));
    }
    let field = ProfileField::parse(&payload.field)
        .ok_or_else(|| AppError::validation("Invalid field"))?;
    state
        .profiles
        .update_field(&username, field, &payload.value)
        .await?;
    Ok(Json(()))
}
