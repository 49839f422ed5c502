use sea_orm::DbErr;
use thiserror::Error;

/// Failure taxonomy shared by every domain operation.
///
/// Each variant is a distinct, stable kind the API layer maps to exactly one
/// status code. Operations that write either complete fully or leave nothing
/// behind.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("not enough permissions")]
    PermissionDenied,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} has expired")]
    Expired(&'static str),

    #[error("{0}")]
    Conflict(String),

    /// Covers both "wrong code" and "already consumed" so a caller cannot
    /// tell which was true.
    #[error("invalid verification code")]
    InvalidCode,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// SQLite reports constraint hits in the error text; SeaORM does not expose
/// them as a dedicated variant for the sqlx backend.
pub fn is_unique_violation(err: &DbErr) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}
