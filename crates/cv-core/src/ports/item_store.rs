use anyhow::Result;
use async_trait::async_trait;

use crate::clipboard::{ClipboardItem, ContentHash};
use crate::ids::ItemId;

/// Hash-indexed persistence of clipboard history items.
///
/// Conventions:
/// - `content_hash` is unique; `insert` of a hash that already exists is an error
/// - implementations are shared across concurrent capture tasks
#[async_trait]
pub trait ItemStorePort: Send + Sync {
    /// Look up the item created for `hash`, if any.
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<ClipboardItem>>;

    /// Persist a fully built item (metadata included) in one write.
    async fn insert(&self, item: &ClipboardItem) -> Result<()>;

    /// Set `last_accessed_at_ms` to `max(current, at_ms)`.
    ///
    /// Only the timestamp is written; user attributes are left untouched.
    /// Returns `false` when no item with `id` exists.
    async fn touch_last_accessed(&self, id: &ItemId, at_ms: i64) -> Result<bool>;

    async fn get_item(&self, id: &ItemId) -> Result<Option<ClipboardItem>>;
}
