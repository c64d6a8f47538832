//! SQLite storage implementation for the wishlist.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `wishlist-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Embedded Diesel migrations
//! - The wishes repository and its Diesel model types
//! - Whole-database snapshots and the one-time import of the legacy `wishlist` table
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//!   core (domain)      server (http)
//!         │                 │
//!         └────────┬────────┘
//!                  ▼
//!       storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod legacy;
pub mod schema;

// Repository implementations
pub mod wishes;

// Re-export database utilities
pub use db::{
    backup_database, create_pool, get_connection, init, run_migrations, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from wishlist-core for convenience
pub use wishlist_core::errors::{DatabaseError, Error, Result};
