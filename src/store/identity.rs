//! User accounts: registration, login verification, admin management,
//! cascading account deletion.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::SqlitePool;

use super::map_unique_violation;
use crate::error::AppError;
use crate::models::user::User;

/// Usernames double as upload directory names and theme owner keys, so
/// they are held to the identifier pattern.
static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,31}$").expect("username pattern compiles"));

// bcrypt reads at most 72 bytes of input.
const BCRYPT_MAX_BYTES: usize = 72;

fn password_bytes(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(BCRYPT_MAX_BYTES)]
}

fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password_bytes(password), DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))
}

fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password_bytes(password), password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))
}

#[derive(Clone)]
pub struct IdentityStore {
    pool: SqlitePool,
}

impl IdentityStore {
    pub fn new(pool: SqlitePool) -> Self {
        IdentityStore { pool }
    }

    /// Create the user plus its empty profile row in one transaction.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        if !USERNAME_PATTERN.is_match(username) {
            return Err(AppError::validation(
                "Username must be 1-32 letters, digits or underscores, not starting with a digit",
            ));
        }
        if password.len() < 6 {
            return Err(AppError::validation("Password too short"));
        }

        let password_hash = hash_password(password)?;
        let created_at = Utc::now();

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO users (username, password_hash, is_admin, created_at) VALUES (?, ?, 0, ?)",
        )
        .bind(username)
        .bind(&password_hash)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "Username already taken"))?;

        sqlx::query("INSERT INTO profiles (username) VALUES (?)")
            .bind(username)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(User {
            username: username.to_string(),
            password_hash,
            is_admin: false,
            created_at,
        })
    }

    /// Unknown user and wrong password produce the same failure.
    pub async fn verify_login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password_hash, is_admin, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::AuthFailure)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::AuthFailure);
        }
        Ok(user)
    }

    pub async fn fetch_user(&self, username: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT username, password_hash, is_admin, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// The actor's admin flag is re-read from the database, not taken
    /// from the token.
    pub async fn promote_to_admin(&self, actor: &str, target: &str) -> Result<User, AppError> {
        let actor_row = self.fetch_user(actor).await?;
        if !actor_row.is_admin {
            return Err(AppError::access_denied("Admin privileges required"));
        }

        let result = sqlx::query("UPDATE users SET is_admin = 1 WHERE username = ?")
            .bind(target)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }
        self.fetch_user(target).await
    }

    /// Delete the account and everything it owns, all or nothing.
    /// Uploaded files on disk are left to operator cleanup.
    pub async fn delete_user(&self, username: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM posts WHERE username = ?")
            .bind(username)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM themes WHERE owner = ?")
            .bind(username)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM profiles WHERE username = ?")
            .bind(username)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }
        tx.commit().await?;
        Ok(())
    }

    /// Create the configured admin account if it does not exist yet.
    pub async fn seed_admin(&self, username: &str, password: &str) -> Result<(), AppError> {
        let password_hash = hash_password(password)?;
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT OR IGNORE INTO users (username, password_hash, is_admin, created_at) VALUES (?, ?, 1, ?)",
        )
        .bind(username)
        .bind(&password_hash)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        sqlx::query("INSERT OR IGNORE INTO profiles (username) VALUES (?)")
            .bind(username)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        if result.rows_affected() > 0 {
            tracing::info!(username, "Seeded admin account");
        }
        Ok(())
    }
}
