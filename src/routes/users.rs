use axum::{Router, routing::{delete, get, post}, middleware};
use crate::state::AppState;
use crate::handlers::user::{
    delete_me, delete_user_admin, get_me, login_user, promote_user, register_user,
};
use crate::middleware::auth::require_auth;

pub fn routes(state: AppState) -> Router<AppState> {
    let open = Router::new()
        .route("/users/register", post(register_user))
        .route("/users/login", post(login_user));

    let protected = Router::new()
        .route("/users/me", get(get_me).delete(delete_me))
        .route("/admin/promote", post(promote_user))
        .route("/admin/users/{username}", delete(delete_user_admin))
        .layer(middleware::from_fn_with_state(state, require_auth));

    open.merge(protected)
}
