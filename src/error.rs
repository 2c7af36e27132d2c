//! Error types for Bookmarl.

use thiserror::Error;

/// Common error type for service bootstrap (configuration, storage, logging).
///
/// Request-level failures use [`crate::auth::AuthError`] instead.
#[derive(Error, Debug)]
pub enum BookmarlError {
    /// Database error.
    ///
    /// Errors from sqlx are converted automatically.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for configuration or input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BookmarlError {
    fn from(e: sqlx::Error) -> Self {
        BookmarlError::Database(e.to_string())
    }
}

/// Result type alias for Bookmarl operations.
pub type Result<T> = std::result::Result<T, BookmarlError>;
