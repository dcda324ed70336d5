pub mod files;
pub mod posts;
pub mod profiles;
pub mod themes;
pub mod users;

use axum::Router;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(users::routes(state.clone()))
        .merge(profiles::routes(state.clone()))
        .merge(posts::routes(state.clone()))
        .merge(files::routes(state.clone()))
        .merge(themes::routes(state))
}
