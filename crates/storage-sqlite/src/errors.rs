//! Storage-specific error types for SQLite operations.
//!
//! This module provides error types that wrap Diesel, r2d2 and rusqlite errors and
//! convert them to the database-agnostic error types defined in `wishlist_core`.

use diesel::result::Error as DieselError;
use thiserror::Error;
use wishlist_core::errors::{DatabaseError, Error};

/// Storage-specific errors.
///
/// These errors are internal to the storage layer and are converted to
/// `wishlist_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Backup failed: {0}")]
    BackupFailed(#[from] rusqlite::Error),

    /// A domain error raised inside a writer job; handed back unchanged.
    #[error("{0}")]
    Core(Error),
}

/// Carry core errors through the writer's transaction wrapper untouched.
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Core(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::BackupFailed(e) => {
                Error::Database(DatabaseError::BackupFailed(e.to_string()))
            }
            StorageError::Core(e) => e,
        }
    }
}

/// Extension trait for easily converting Diesel Results to core Results.
///
/// This provides a `.into_core()` method on any `Result<T, diesel::result::Error>`
/// which handles the conversion through StorageError.
pub trait IntoCore<T> {
    fn into_core(self) -> wishlist_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> wishlist_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> wishlist_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, rusqlite::Error> {
    fn into_core(self) -> wishlist_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
