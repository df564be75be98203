use std::sync::Arc;

use cv_core::ports::{
    BlobSinkPort, ClipboardMonitorPort, ClockPort, ItemStorePort, MetadataExtractorPort,
};

/// Ports required by the capture orchestrator.
///
/// Plain struct, filled in by the wiring layer.
pub struct CaptureDeps {
    pub monitor: Arc<dyn ClipboardMonitorPort>,
    pub item_store: Arc<dyn ItemStorePort>,
    pub metadata_extractor: Arc<dyn MetadataExtractorPort>,
    pub blob_sink: Arc<dyn BlobSinkPort>,
    pub clock: Arc<dyn ClockPort>,
}
