use axum::body::Bytes;
use axum::extract::{Extension, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::dtos::file::UploadResponse;
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

// POST /files/{username}/{filename} - Upload an image into the caller's area
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((username, filename)): Path<(String, String)>,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    if username != auth.username {
        return Err(AppError::access_denied(
            "You can only upload to your own file area",
        ));
    }
    let stored = state.files.save_file(&auth.username, &filename, &body)?;
    Ok((StatusCode::CREATED, Json(UploadResponse { filename: stored })))
}

// GET /files - Names of the caller's uploads
pub async fn list_files(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.files.list_files(&auth.username)?))
}

// GET /files/{username}/{filename} - Download a stored file
// Downloads are open to any authenticated user; path safety is always
// enforced by the file area.
pub async fn download_file(
    State(state): State<AppState>,
    Path((username, filename)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let (data, content_type) = state.files.open_file(&username, &filename)?;
    Ok(([(header::CONTENT_TYPE, content_type)], data).into_response())
}
