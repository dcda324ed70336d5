use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::{get, post}, middleware};
use crate::state::AppState;
use crate::handlers::theme::{
    export_theme, get_active_theme, import_theme, list_themes, set_active_theme,
};
use crate::middleware::auth::require_auth;
use crate::theme_codec::MAX_PAYLOAD_BYTES;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/themes", get(list_themes))
        .route("/themes/active", get(get_active_theme).put(set_active_theme))
        .route("/themes/{theme}", post(import_theme))
        .route("/themes/{theme}/export", get(export_theme))
        // The body limit sits above the cap so the codec reports the
        // oversize error in the JSON shape.
        .layer(DefaultBodyLimit::max(2 * MAX_PAYLOAD_BYTES))
        .layer(middleware::from_fn_with_state(state, require_auth))
}
