//! Core error types for the wishlist.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the wishlist.
///
/// Every failure surfaced to a caller maps to exactly one of these variants.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Interchange(#[from] InterchangeError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database backup operation failed.
    #[error("Database backup failed: {0}")]
    BackupFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input. Messages name the offending field.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(String),

    #[error("{0} must be numeric")]
    InvalidNumber(String),

    #[error("{0} must be a valid URL")]
    InvalidUrl(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised while reading or writing the CSV interchange format.
#[derive(Error, Debug)]
pub enum InterchangeError {
    #[error("Malformed CSV: {0}")]
    MalformedCsv(String),

    #[error("CSV is not valid UTF-8: {0}")]
    Encoding(String),
}

impl Error {
    /// Field named by a validation failure, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation(
                ValidationError::MissingField(f)
                | ValidationError::InvalidNumber(f)
                | ValidationError::InvalidUrl(f),
            ) => Some(f),
            _ => None,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Interchange(InterchangeError::MalformedCsv(err.to_string()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
