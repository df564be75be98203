use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::{debug, info, info_span, warn, Instrument};

use cv_core::clipboard::preview::{join_stored_paths, preview_text};
use cv_core::ports::{BlobSinkPort, ItemStorePort, MetadataExtractorPort};
use cv_core::{
    ClipboardChangeEvent, ClipboardItem, ContentHash, ContentKind, ItemId, MetadataFailurePolicy,
};

use super::hash_lock::HashLocks;

/// Buffered `item_added` messages per subscriber before it starts lagging.
const ITEM_ADDED_CAPACITY: usize = 64;
/// Extension used when the image bytes carry no recognisable signature.
const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// Result of one successful capture.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// New content: the item was built and persisted.
    Created(ClipboardItem),
    /// Known content: only `last_accessed_at_ms` of this item was touched.
    Touched(ItemId),
}

/// Turn one clipboard change into a persisted, deduplicated history item.
///
/// # Behavior
/// - 1. Hash the content record
/// - 2. Take the per-hash lock, then look the hash up
/// - 3. Hit: touch `last_accessed_at_ms` with the capture time, done
/// - 4. Miss: build the item (preview, blob or stored paths, metadata),
///   insert it, then publish it on `item_added`
///
/// Errors are returned to the caller; isolating them from the monitor is the
/// orchestrator's job.
pub struct CaptureClipboardUseCase {
    item_store: Arc<dyn ItemStorePort>,
    metadata_extractor: Arc<dyn MetadataExtractorPort>,
    blob_sink: Arc<dyn BlobSinkPort>,
    metadata_failure_policy: MetadataFailurePolicy,
    hash_locks: HashLocks,
    item_added: broadcast::Sender<ClipboardItem>,
}

impl CaptureClipboardUseCase {
    pub fn new(
        item_store: Arc<dyn ItemStorePort>,
        metadata_extractor: Arc<dyn MetadataExtractorPort>,
        blob_sink: Arc<dyn BlobSinkPort>,
        metadata_failure_policy: MetadataFailurePolicy,
    ) -> Self {
        let (item_added, _) = broadcast::channel(ITEM_ADDED_CAPACITY);
        Self {
            item_store,
            metadata_extractor,
            blob_sink,
            metadata_failure_policy,
            hash_locks: HashLocks::new(),
            item_added,
        }
    }

    /// Receive items created after this call, at most once each.
    ///
    /// A receiver more than `ITEM_ADDED_CAPACITY` items behind gets
    /// `RecvError::Lagged` and skips the oldest ones. The store stays the
    /// source of truth.
    pub fn subscribe_item_added(&self) -> broadcast::Receiver<ClipboardItem> {
        self.item_added.subscribe()
    }

    /// Hashes whose capture is currently in progress.
    pub fn in_flight_hashes(&self) -> usize {
        self.hash_locks.in_flight()
    }

    pub async fn execute(&self, event: ClipboardChangeEvent) -> Result<CaptureOutcome> {
        let hash = event.content.content_hash();
        let span = info_span!(
            "usecase.capture_clipboard.execute",
            kind = %event.content.kind,
            hash = %hash,
        );

        async move {
            let _hash_lock = self.hash_locks.lock(&hash).await;

            if let Some(existing) = self.item_store.find_by_hash(&hash).await? {
                self.item_store
                    .touch_last_accessed(&existing.id, event.captured_at_ms)
                    .await
                    .with_context(|| format!("touch item {}", existing.id))?;
                debug!(item_id = %existing.id, "Duplicate clipboard content, touched existing item");
                return Ok(CaptureOutcome::Touched(existing.id));
            }

            let item = self.build_item(&event, hash).await?;
            self.item_store.insert(&item).await?;
            info!(item_id = %item.id, preview_len = item.preview_text.len(), "Clipboard item created");

            // No receivers is not an error.
            let _ = self.item_added.send(item.clone());
            Ok(CaptureOutcome::Created(item))
        }
        .instrument(span)
        .await
    }

    async fn build_item(
        &self,
        event: &ClipboardChangeEvent,
        content_hash: ContentHash,
    ) -> Result<ClipboardItem> {
        let record = &event.content;
        let id = ItemId::new();

        let file_path = match (&record.kind, &record.image_bytes) {
            (ContentKind::Image, Some(bytes)) => {
                let path = self
                    .blob_sink
                    .write(bytes, image_extension(bytes))
                    .await
                    .context("write image blob")?;
                let path = path
                    .to_str()
                    .ok_or_else(|| anyhow::anyhow!("blob path is not valid UTF-8: {}", path.display()))?
                    .to_string();
                Some(path)
            }
            _ => record.non_empty_file_paths().map(join_stored_paths),
        };

        let metadata = match self.metadata_extractor.extract(record, &id).await {
            Ok(metadata) => Some(metadata),
            Err(err) => match self.metadata_failure_policy {
                MetadataFailurePolicy::SaveWithoutMetadata => {
                    warn!(item_id = %id, error = ?err, "Metadata extraction failed, saving item without metadata");
                    None
                }
                MetadataFailurePolicy::DropItem => {
                    return Err(err.context("metadata extraction failed, item dropped"));
                }
            },
        };

        Ok(ClipboardItem {
            id,
            content_type: record.kind,
            text_content: record.text.clone(),
            file_path,
            preview_text: preview_text(record),
            source_application: event.source_application.clone(),
            content_hash,
            created_at_ms: event.captured_at_ms,
            last_accessed_at_ms: event.captured_at_ms,
            group_id: None,
            is_favorite: false,
            metadata,
        })
    }
}

/// File extension matching the image signature, `png` when unrecognised.
pub fn image_extension(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or(DEFAULT_IMAGE_EXTENSION)
}
