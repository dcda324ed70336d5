#![allow(dead_code)]

use sqlx::SqlitePool;
use tempfile::TempDir;

use tintboard_backend::config::AppConfig;
use tintboard_backend::database;
use tintboard_backend::state::AppState;

/// Fresh file-backed database under a temp dir. Keep the guard alive for
/// the duration of the test.
pub async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}/test.db", dir.path().display());
    let pool = database::create_pool(&url).await.expect("pool");
    database::run_migrations(&pool).await.expect("migrations");
    (dir, pool)
}

/// Full application state with database and uploads under one temp dir.
pub async fn test_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}/test.db", dir.path().display());
    let pool = database::create_pool(&url).await.expect("pool");
    database::run_migrations(&pool).await.expect("migrations");

    let config = AppConfig {
        database_url: url,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "test-secret".to_string(),
        upload_dir: dir.path().join("uploads").display().to_string(),
        admin_seed: None,
    };
    (dir, AppState::new(pool, config))
}

/// Insert a user row plus its profile directly, hashing at the minimum
/// bcrypt cost to keep tests fast.
pub async fn seed_user(pool: &SqlitePool, username: &str, password: &str, is_admin: bool) {
    let password_hash = bcrypt::hash(password, 4).expect("hash");
    sqlx::query(
        "INSERT INTO users (username, password_hash, is_admin, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(password_hash)
    .bind(is_admin)
    .bind(chrono::Utc::now())
    .execute(pool)
    .await
    .expect("insert user");

    sqlx::query("INSERT INTO profiles (username) VALUES (?)")
        .bind(username)
        .execute(pool)
        .await
        .expect("insert profile");
}

/// Insert a public (ownerless) theme directly.
pub async fn seed_public_theme(pool: &SqlitePool, name: &str, payload: &str) {
    let attrs = tintboard_backend::theme_codec::decode(payload.as_bytes()).expect("valid payload");
    sqlx::query(
        "INSERT INTO themes (name, owner, color, font, payload, created_at) VALUES (?, NULL, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(attrs.derived_color())
    .bind(attrs.derived_font())
    .bind(tintboard_backend::theme_codec::encode(&attrs))
    .bind(chrono::Utc::now())
    .execute(pool)
    .await
    .expect("insert theme");
}
