//! Wish repository and service traits.
//!
//! These traits define the contract for wish operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::wishes_model::{NewWish, Wish, WishInput, WishPatch};
use crate::errors::Result;

/// Trait defining the contract for Wish repository operations.
#[async_trait]
pub trait WishRepositoryTrait: Send + Sync {
    /// Lists every wish, newest first (ties broken by id, highest first).
    fn list(&self) -> Result<Vec<Wish>>;

    /// Retrieves a wish by its id.
    ///
    /// Returns `Error::NotFound` when no row matches.
    fn get_by_id(&self, wish_id: i32) -> Result<Wish>;

    /// Inserts a new row and returns it as stored.
    async fn insert(&self, new_wish: NewWish) -> Result<Wish>;

    /// Applies a coalescing patch and returns the stored row.
    ///
    /// Returns `Error::NotFound` when no row matches.
    async fn update(&self, wish_id: i32, patch: WishPatch) -> Result<Wish>;

    /// Deletes a wish by its id.
    ///
    /// Returns the number of deleted records (0 or 1).
    async fn delete(&self, wish_id: i32) -> Result<usize>;

    /// Appends every record inside one transaction; either all rows land or none.
    async fn insert_many(&self, new_wishes: Vec<NewWish>) -> Result<usize>;
}

/// Trait defining the contract for Wish service operations.
#[async_trait]
pub trait WishServiceTrait: Send + Sync {
    fn list_wishes(&self) -> Result<Vec<Wish>>;

    fn get_wish(&self, wish_id: i32) -> Result<Wish>;

    async fn create_wish(&self, input: WishInput) -> Result<Wish>;

    async fn update_wish(&self, wish_id: i32, input: WishInput) -> Result<Wish>;

    async fn delete_wish(&self, wish_id: i32) -> Result<usize>;
}
