use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

use cv_core::clipboard::preview::split_stored_paths;
use cv_core::ports::{BlobSinkPort, ClipboardMonitorPort, ClockPort, ItemStorePort};
use cv_core::{ClipboardContentRecord, ClipboardItem, ContentKind};

/// Copy a history item back into the system clipboard.
///
/// This use case represents a user intention to reuse a previously captured
/// item. On success the item's `last_accessed_at_ms` is touched; a failed
/// write leaves the item untouched.
pub struct CopyItemToSystemClipboard {
    monitor: Arc<dyn ClipboardMonitorPort>,
    item_store: Arc<dyn ItemStorePort>,
    blob_sink: Arc<dyn BlobSinkPort>,
    clock: Arc<dyn ClockPort>,
}

impl CopyItemToSystemClipboard {
    pub fn new(
        monitor: Arc<dyn ClipboardMonitorPort>,
        item_store: Arc<dyn ItemStorePort>,
        blob_sink: Arc<dyn BlobSinkPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            monitor,
            item_store,
            blob_sink,
            clock,
        }
    }

    pub async fn execute(&self, item: &ClipboardItem) -> Result<()> {
        let span = info_span!(
            "usecase.copy_item_to_system_clipboard.execute",
            item_id = %item.id,
            kind = %item.content_type,
        );

        async {
            let record = self.reconstruct_record(item).await?;
            self.monitor.set_content(record).await?;

            let touched = self
                .item_store
                .touch_last_accessed(&item.id, self.clock.now_ms())
                .await?;
            if !touched {
                warn!("Copied item is no longer in the store");
            }

            info!("Item copied to system clipboard");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Rebuild the content record an item was created from.
    ///
    /// Stored multi-file paths come back in their original order; image
    /// bytes are read back from the blob sink.
    pub async fn reconstruct_record(&self, item: &ClipboardItem) -> Result<ClipboardContentRecord> {
        let now = self.clock.now_ms();
        let record = match item.content_type {
            ContentKind::Text => ClipboardContentRecord::text(required_text(item)?, now),
            ContentKind::Html => ClipboardContentRecord::html(required_text(item)?, now),
            ContentKind::Rtf => ClipboardContentRecord::rtf(required_text(item)?, now),
            ContentKind::Image => {
                let path = required_file_path(item)?;
                let bytes = self.blob_sink.read(Path::new(path)).await?;
                ClipboardContentRecord::image(bytes, now)
            }
            ContentKind::FilePaths => {
                let paths = split_stored_paths(required_file_path(item)?);
                if paths.is_empty() {
                    return Err(anyhow!("item {} has no stored file paths", item.id));
                }
                ClipboardContentRecord::file_paths(paths, now)
            }
            ContentKind::Unknown => {
                return Err(anyhow!(
                    "item {} has unknown content and cannot be copied",
                    item.id
                ));
            }
        };
        Ok(record)
    }
}

fn required_text(item: &ClipboardItem) -> Result<&str> {
    item.text_content
        .as_deref()
        .ok_or_else(|| anyhow!("item {} has no text content", item.id))
}

fn required_file_path(item: &ClipboardItem) -> Result<&str> {
    item.file_path
        .as_deref()
        .ok_or_else(|| anyhow!("item {} has no file path", item.id))
}
