pub mod identity;
pub mod profiles;
pub mod themes;

use sqlx::error::ErrorKind;
use sqlx::Error as SqlxError;

use crate::error::AppError;

/// Turn a UNIQUE constraint violation into the conflict error the caller
/// names; anything else stays a database error.
pub(crate) fn map_unique_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if matches!(db_err.kind(), ErrorKind::UniqueViolation) => {
            AppError::name_conflict(message)
        }
        other => other.into(),
    }
}
