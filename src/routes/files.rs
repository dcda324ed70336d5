use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get, middleware};
use crate::files::MAX_UPLOAD_BYTES;
use crate::state::AppState;
use crate::handlers::file::{download_file, list_files, upload_file};
use crate::middleware::auth::require_auth;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/files", get(list_files))
        .route(
            "/files/{username}/{filename}",
            get(download_file).post(upload_file),
        )
        // The body limit sits above the cap so the handler reports the
        // oversize error in the JSON shape.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 1024))
        .layer(middleware::from_fn_with_state(state, require_auth))
}
