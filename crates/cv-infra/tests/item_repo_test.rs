//! Item Repository Tests
//!
//! Exercises the diesel repository through the public executor seam.

use std::sync::Arc;

use cv_core::ports::ItemStorePort;
use cv_core::{ClipboardContentRecord, ClipboardItem, ContentKind, ItemId};
use cv_infra::db::mappers::ClipboardItemRowMapper;
use cv_infra::db::repositories::DieselItemRepository;

/// In-memory test executor for testing repositories
struct TestDbExecutor {
    pool: Arc<cv_infra::db::pool::DbPool>,
}

impl TestDbExecutor {
    fn new() -> Self {
        let pool = Arc::new(
            cv_infra::db::pool::init_db_pool(":memory:").expect("Failed to create test DB pool"),
        );
        Self { pool }
    }
}

impl cv_infra::db::ports::DbExecutor for TestDbExecutor {
    fn run<T>(
        &self,
        f: impl FnOnce(&mut diesel::SqliteConnection) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let mut conn = self.pool.get()?;
        f(&mut conn)
    }
}

fn image_item(path: &str, bytes: &[u8]) -> ClipboardItem {
    let record = ClipboardContentRecord::image(bytes.to_vec(), 1_704_067_200_000);
    ClipboardItem {
        id: ItemId::new(),
        content_type: ContentKind::Image,
        text_content: None,
        file_path: Some(path.to_string()),
        preview_text: "Image".to_string(),
        source_application: Some("Preview".to_string()),
        content_hash: record.content_hash(),
        created_at_ms: record.captured_at_ms,
        last_accessed_at_ms: record.captured_at_ms,
        group_id: None,
        is_favorite: false,
        metadata: None,
    }
}

#[tokio::test]
async fn test_insert_and_find_image_item_by_hash() {
    let repo = DieselItemRepository::with_mapper(TestDbExecutor::new(), ClipboardItemRowMapper);
    let item = image_item("/data/blobs/abc.png", b"\x89PNG-bytes");

    repo.insert(&item).await.expect("Failed to insert item");

    let found = repo
        .find_by_hash(&item.content_hash)
        .await
        .expect("Failed to find item by hash");

    assert!(found.is_some(), "Item should be found by hash");
    let found = found.unwrap();
    assert_eq!(found.id, item.id);
    assert_eq!(found.file_path.as_deref(), Some("/data/blobs/abc.png"));
    assert!(found.metadata.is_none());
}

#[tokio::test]
async fn test_find_unknown_hash_returns_none() {
    let repo = DieselItemRepository::new(TestDbExecutor::new());
    let record = ClipboardContentRecord::text("never stored", 1);

    let found = repo.find_by_hash(&record.content_hash()).await.unwrap();

    assert!(found.is_none());
}
