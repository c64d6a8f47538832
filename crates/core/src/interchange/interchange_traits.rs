use async_trait::async_trait;

use crate::errors::Result;

/// Bulk export/import of the wishlist in CSV form.
#[async_trait]
pub trait InterchangeServiceTrait: Send + Sync {
    /// Renders every wish, newest first, as a CSV document.
    fn export_csv(&self) -> Result<Vec<u8>>;

    /// Appends every row of an uploaded CSV. Returns the number of rows added.
    async fn import_csv(&self, content: &[u8]) -> Result<usize>;
}
