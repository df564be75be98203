use crate::db::models::{ClipboardItemRow, NewClipboardItemRow};
use crate::db::ports::{InsertMapper, RowMapper};
use anyhow::{Context, Result};
use cv_core::{ClipboardItem, ContentHash, ContentKind, ItemId, ItemMetadata};

pub struct ClipboardItemRowMapper;

impl InsertMapper<ClipboardItem, NewClipboardItemRow> for ClipboardItemRowMapper {
    fn to_row(&self, domain: &ClipboardItem) -> Result<NewClipboardItemRow> {
        let metadata_json = domain
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context("serialize item metadata")?;

        Ok(NewClipboardItemRow {
            id: domain.id.to_string(),
            content_type: domain.content_type.as_str().to_string(),
            text_content: domain.text_content.clone(),
            file_path: domain.file_path.clone(),
            preview_text: domain.preview_text.clone(),
            source_application: domain.source_application.clone(),
            content_hash: domain.content_hash.to_string(),
            created_at_ms: domain.created_at_ms,
            last_accessed_at_ms: domain.last_accessed_at_ms,
            group_id: domain.group_id.clone(),
            is_favorite: domain.is_favorite,
            metadata_json,
        })
    }
}

impl RowMapper<ClipboardItemRow, ClipboardItem> for ClipboardItemRowMapper {
    fn to_domain(&self, row: &ClipboardItemRow) -> Result<ClipboardItem> {
        let content_type: ContentKind = row.content_type.parse()?;
        let metadata = row
            .metadata_json
            .as_deref()
            .map(serde_json::from_str::<ItemMetadata>)
            .transpose()
            .with_context(|| format!("parse metadata of item {}", row.id))?;

        Ok(ClipboardItem {
            id: ItemId::from(row.id.clone()),
            content_type,
            text_content: row.text_content.clone(),
            file_path: row.file_path.clone(),
            preview_text: row.preview_text.clone(),
            source_application: row.source_application.clone(),
            content_hash: ContentHash::from_hex(row.content_hash.clone()),
            created_at_ms: row.created_at_ms,
            last_accessed_at_ms: row.last_accessed_at_ms,
            group_id: row.group_id.clone(),
            is_favorite: row.is_favorite,
            metadata,
        })
    }
}
