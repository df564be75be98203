use crate::db::schema::clipboard_items;
use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = clipboard_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClipboardItemRow {
    pub id: String,
    pub content_type: String,
    pub text_content: Option<String>,
    pub file_path: Option<String>,
    pub preview_text: String,
    pub source_application: Option<String>,
    pub content_hash: String,
    pub created_at_ms: i64,
    pub last_accessed_at_ms: i64,
    pub group_id: Option<String>,
    pub is_favorite: bool,
    pub metadata_json: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = clipboard_items)]
pub struct NewClipboardItemRow {
    pub id: String,
    pub content_type: String,
    pub text_content: Option<String>,
    pub file_path: Option<String>,
    pub preview_text: String,
    pub source_application: Option<String>,
    pub content_hash: String,
    pub created_at_ms: i64,
    pub last_accessed_at_ms: i64,
    pub group_id: Option<String>,
    pub is_favorite: bool,
    pub metadata_json: Option<String>,
}
