// src/config.rs
use std::env;

/// Application configuration, read once at startup and carried in
/// `AppState`. Nothing reads the environment after this point.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub upload_dir: String,
    pub admin_seed: Option<AdminSeed>,
}

/// Optional admin account created at startup if it does not exist.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://tintboard.db".to_string());
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        let admin_seed = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(username), Ok(password)) if !username.is_empty() => {
                Some(AdminSeed { username, password })
            }
            _ => None,
        };

        AppConfig {
            database_url,
            host,
            port,
            jwt_secret,
            upload_dir,
            admin_seed,
        }
    }
}
