// src/error.rs
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

use crate::theme_codec::ThemeCodecError;

/// Application-level error taxonomy. Every store operation returns one of
/// these; the web layer recovers them into a JSON body plus status code.
#[derive(Debug)]
pub enum AppError {
    DatabaseError(sqlx::Error),
    AuthFailure,
    AccessDenied(String),
    NotFound(String),
    NameConflict(String),
    MalformedTheme(String),
    PayloadTooLarge(String),
    InvalidPath(String),
    InvalidFileType(String),
    ValidationError(String),
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn access_denied(msg: impl Into<String>) -> Self {
        AppError::AccessDenied(msg.into())
    }

    pub fn name_conflict(msg: impl Into<String>) -> Self {
        AppError::NameConflict(msg.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        AppError::InvalidPath(msg.into())
    }

    pub fn invalid_file_type(msg: impl Into<String>) -> Self {
        AppError::InvalidFileType(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn db(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseError(e) => {
                tracing::error!(?e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(%msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::AuthFailure => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
            AppError::AccessDenied(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::NameConflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::MalformedTheme(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::InvalidPath(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidFileType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl From<ThemeCodecError> for AppError {
    fn from(err: ThemeCodecError) -> Self {
        match err {
            ThemeCodecError::PayloadTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            other => AppError::MalformedTheme(other.to_string()),
        }
    }
}
