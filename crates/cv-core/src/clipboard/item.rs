use serde::{Deserialize, Serialize};

use super::{ContentHash, ContentKind, ItemMetadata};
use crate::ids::ItemId;

/// A persisted clipboard history entry, unique per `content_hash`.
///
/// The capture pipeline only ever creates items and touches
/// `last_accessed_at_ms`; `group_id` and `is_favorite` belong to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardItem {
    pub id: ItemId,
    pub content_type: ContentKind,
    pub text_content: Option<String>,
    /// Blob path for images; `;`-joined paths for file references.
    pub file_path: Option<String>,
    pub preview_text: String,
    pub source_application: Option<String>,
    pub content_hash: ContentHash,
    pub created_at_ms: i64,
    pub last_accessed_at_ms: i64,
    pub group_id: Option<String>,
    pub is_favorite: bool,
    pub metadata: Option<ItemMetadata>,
}

impl ClipboardItem {
    /// Timestamp a touch would leave behind: never lower than the current one.
    pub fn touched_at(&self, at_ms: i64) -> i64 {
        self.last_accessed_at_ms.max(at_ms)
    }
}
