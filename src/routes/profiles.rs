use axum::{Router, routing::get, middleware};
use crate::state::AppState;
use crate::handlers::profile::{get_profile, update_profile};
use crate::middleware::auth::require_auth;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profiles/{username}", get(get_profile).put(update_profile))
        .layer(middleware::from_fn_with_state(state, require_auth))
}
