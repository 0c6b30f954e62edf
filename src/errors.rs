//! Centralized error handling.
//!
//! Provides a unified error type for the entire application. Every
//! service operation returns either its entity or one of these signals,
//! so callers can map them 1:1 onto their own responses.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Owner does not exist")]
    OwnerNotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Storage failures (transaction or connectivity)
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::DuplicateEmail => "DUPLICATE_EMAIL",
            AppError::OwnerNotFound => "OWNER_NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "STORAGE_FAILURE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for errors caused by the caller's input rather than by the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound
                | AppError::DuplicateEmail
                | AppError::OwnerNotFound
                | AppError::Validation(_)
        )
    }

    /// Classify a failed write.
    ///
    /// `usuarios.email` is the only unique column besides primary keys and
    /// `cultivos.usuario_id` the only foreign key, so constraint violations
    /// reported by the database map onto the same signals the services raise
    /// from their own pre-write checks.
    pub fn from_write(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateEmail,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::OwnerNotFound,
            _ => AppError::Database(err),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound.code(), "NOT_FOUND");
        assert_eq!(AppError::DuplicateEmail.code(), "DUPLICATE_EMAIL");
        assert_eq!(AppError::OwnerNotFound.code(), "OWNER_NOT_FOUND");
        assert_eq!(
            AppError::Database(DbErr::Custom("boom".into())).code(),
            "STORAGE_FAILURE"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(AppError::DuplicateEmail.is_client_error());
        assert!(AppError::OwnerNotFound.is_client_error());
        assert!(AppError::validation("bad email").is_client_error());
        assert!(!AppError::internal("hasher failed").is_client_error());
        assert!(!AppError::Database(DbErr::Custom("down".into())).is_client_error());
    }

    #[test]
    fn test_unclassified_write_error_is_storage_failure() {
        let err = AppError::from_write(DbErr::Custom("connection reset".into()));
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_option_ext() {
        assert_eq!(Some(7).ok_or_not_found().unwrap(), 7);
        assert!(matches!(None::<i32>.ok_or_not_found(), Err(AppError::NotFound)));
    }
}
