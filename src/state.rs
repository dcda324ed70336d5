use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::files::FileArea;
use crate::store::identity::IdentityStore;
use crate::store::profiles::ProfileStore;
use crate::store::themes::ThemeStore;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<AppConfig>,
    pub identity: IdentityStore,
    pub profiles: ProfileStore,
    pub themes: ThemeStore,
    pub files: FileArea,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: AppConfig) -> Self {
        let config = Arc::new(config);
        AppState {
            identity: IdentityStore::new(db_pool.clone()),
            profiles: ProfileStore::new(db_pool.clone()),
            themes: ThemeStore::new(db_pool.clone()),
            files: FileArea::new(config.upload_dir.as_str()),
            db_pool,
            config,
        }
    }
}
