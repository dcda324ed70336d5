use axum::body::Bytes;
use axum::extract::{Extension, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::instrument;

use crate::dtos::theme::{
    ImportThemeResponse, SetActiveThemeRequest, SetActiveThemeResponse, ThemeSummaryResponse,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::store::themes::ThemeRef;
use crate::theme_codec::ResolvedTheme;

// POST /themes/{name} - Import an uploaded theme file
#[instrument(skip(state, body), fields(name))]
pub async fn import_theme(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<ImportThemeResponse>), AppError> {
    let id = state.themes.import_theme(&auth.username, &name, &body).await?;
    Ok((StatusCode::CREATED, Json(ImportThemeResponse { id, name })))
}

// GET /themes - Themes visible to the caller
#[instrument(skip(state))]
pub async fn list_themes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<ThemeSummaryResponse>>, AppError> {
    let themes = state.themes.list_visible_themes(&auth.username).await?;
    let response = themes
        .into_iter()
        .map(|t| ThemeSummaryResponse::for_user(t, &auth.username))
        .collect();
    Ok(Json(response))
}

// GET /themes/active - The caller's resolved active theme
#[instrument(skip(state))]
pub async fn get_active_theme(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ResolvedTheme>, AppError> {
    let resolved = state.themes.resolve_active_theme(&auth.username).await?;
    Ok(Json(resolved))
}

// PUT /themes/active - Select the caller's active theme
#[instrument(skip(state, payload))]
pub async fn set_active_theme(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<SetActiveThemeRequest>,
) -> Result<Json<SetActiveThemeResponse>, AppError> {
    let theme_ref = ThemeRef::parse(&payload.theme);
    let name = state
        .themes
        .set_active_theme(&auth.username, &theme_ref)
        .await?;
    Ok(Json(SetActiveThemeResponse { theme: name }))
}

// GET /themes/{theme}/export - Download a theme as a .thm file
#[instrument(skip(state), fields(reference))]
pub async fn export_theme(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(reference): Path<String>,
) -> Result<Response, AppError> {
    let theme_ref = ThemeRef::parse(&reference);
    let (name, bytes) = state
        .themes
        .export_theme(&auth.username, auth.is_admin, &theme_ref)
        .await?;

    let disposition = format!("attachment; filename=\"{name}.thm\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
