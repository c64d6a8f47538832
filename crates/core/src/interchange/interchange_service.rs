use log::info;
use std::sync::Arc;

use super::csv_codec::{parse_csv, render_csv};
use super::interchange_traits::InterchangeServiceTrait;
use crate::errors::Result;
use crate::wishes::{WishDefaults, WishRepositoryTrait};

/// Service moving the wishlist in and out of CSV
pub struct InterchangeService {
    repository: Arc<dyn WishRepositoryTrait>,
    defaults: WishDefaults,
}

impl InterchangeService {
    pub fn new(repository: Arc<dyn WishRepositoryTrait>, defaults: WishDefaults) -> Self {
        Self {
            repository,
            defaults,
        }
    }
}

#[async_trait::async_trait]
impl InterchangeServiceTrait for InterchangeService {
    fn export_csv(&self) -> Result<Vec<u8>> {
        let wishes = self.repository.list()?;
        info!("Exporting {} wish(es) to CSV", wishes.len());
        render_csv(&wishes)
    }

    /// Rows are appended as new wishes; nothing is merged or deduplicated.
    async fn import_csv(&self, content: &[u8]) -> Result<usize> {
        let rows = parse_csv(content, &self.defaults)?;
        if rows.is_empty() {
            return Ok(0);
        }
        let added = self.repository.insert_many(rows).await?;
        info!("Imported {} wish(es) from CSV", added);
        Ok(added)
    }
}
