use log::debug;
use std::sync::Arc;

use super::wishes_model::{Wish, WishDefaults, WishInput};
use super::wishes_traits::{WishRepositoryTrait, WishServiceTrait};
use super::wishes_validation::{normalize_new, normalize_patch};
use crate::errors::Result;

/// Service for managing wishes
pub struct WishService {
    repository: Arc<dyn WishRepositoryTrait>,
    defaults: WishDefaults,
}

impl WishService {
    /// Creates a new WishService instance
    pub fn new(repository: Arc<dyn WishRepositoryTrait>, defaults: WishDefaults) -> Self {
        Self {
            repository,
            defaults,
        }
    }

    pub fn defaults(&self) -> &WishDefaults {
        &self.defaults
    }
}

#[async_trait::async_trait]
impl WishServiceTrait for WishService {
    fn list_wishes(&self) -> Result<Vec<Wish>> {
        self.repository.list()
    }

    fn get_wish(&self, wish_id: i32) -> Result<Wish> {
        self.repository.get_by_id(wish_id)
    }

    async fn create_wish(&self, input: WishInput) -> Result<Wish> {
        let new_wish = normalize_new(input, &self.defaults)?;
        debug!("Creating wish '{}' for {}", new_wish.title, new_wish.owner);
        self.repository.insert(new_wish).await
    }

    /// Coalescing update: an empty patch is answered from storage without a write.
    async fn update_wish(&self, wish_id: i32, input: WishInput) -> Result<Wish> {
        let patch = normalize_patch(input)?;
        if patch.is_empty() {
            return self.repository.get_by_id(wish_id);
        }
        debug!("Updating wish {}", wish_id);
        self.repository.update(wish_id, patch).await
    }

    async fn delete_wish(&self, wish_id: i32) -> Result<usize> {
        let deleted = self.repository.delete(wish_id).await?;
        debug!("Deleted {} row(s) for wish {}", deleted, wish_id);
        Ok(deleted)
    }
}
