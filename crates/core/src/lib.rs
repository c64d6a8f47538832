//! Wishlist Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for the shared wishlist.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod access;
pub mod constants;
pub mod errors;
pub mod interchange;
pub mod wishes;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
