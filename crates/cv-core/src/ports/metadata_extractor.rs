use anyhow::Result;
use async_trait::async_trait;

use crate::clipboard::{ClipboardContentRecord, ItemMetadata};
use crate::ids::ItemId;

/// Produces structured metadata for a new item before it is persisted.
#[async_trait]
pub trait MetadataExtractorPort: Send + Sync {
    async fn extract(&self, record: &ClipboardContentRecord, item_id: &ItemId)
        -> Result<ItemMetadata>;
}
