use axum::{Router, routing::post, middleware};
use crate::state::AppState;
use crate::handlers::post::{create_post, list_posts};
use crate::middleware::auth::require_auth;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post).get(list_posts))
        .layer(middleware::from_fn_with_state(state, require_auth))
}
