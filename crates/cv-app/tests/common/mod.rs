//! Shared fakes for the capture pipeline integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use cv_app::{CaptureDeps, ClipboardCaptureOrchestrator};
use cv_core::ports::{
    BlobSinkPort, ClipboardChangeHandler, ClipboardMonitorPort, ClockPort, ItemStorePort,
    MetadataExtractorPort, MonitorError,
};
use cv_core::{
    ClipboardChangeEvent, ClipboardContentRecord, ClipboardItem, ContentHash, ItemId,
    ItemMetadata, MetadataFailurePolicy,
};
use cv_infra::{BasicMetadataExtractor, FsBlobSink, InMemoryItemStore};
use tempfile::TempDir;

static TRACE_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Monitor fake: records every call and lets the test emit change events.
#[derive(Default)]
pub struct FakeMonitor {
    handler: Mutex<Option<Arc<dyn ClipboardChangeHandler>>>,
    pub subscribe_calls: AtomicUsize,
    pub unsubscribe_calls: AtomicUsize,
    pub start_calls: AtomicUsize,
    pub stop_calls: AtomicUsize,
    pub release_calls: AtomicUsize,
    pub fail_start: AtomicBool,
    pub fail_stop: AtomicBool,
    pub fail_set_content: AtomicBool,
    pub written: Mutex<Vec<ClipboardContentRecord>>,
}

impl FakeMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_subscribed(&self) -> bool {
        self.handler.lock().unwrap().is_some()
    }

    /// Deliver `event` to the subscribed handler. Returns `false` when no
    /// handler is subscribed.
    pub async fn emit(&self, event: ClipboardChangeEvent) -> bool {
        let handler = self.handler.lock().unwrap().clone();
        match handler {
            Some(handler) => {
                handler.on_clipboard_changed(event).await;
                true
            }
            None => false,
        }
    }

    pub async fn emit_record(&self, record: ClipboardContentRecord) -> bool {
        self.emit(ClipboardChangeEvent::new(record)).await
    }

    pub fn written(&self) -> Vec<ClipboardContentRecord> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClipboardMonitorPort for FakeMonitor {
    fn subscribe(&self, handler: Arc<dyn ClipboardChangeHandler>) {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        *self.handler.lock().unwrap() = Some(handler);
    }

    fn unsubscribe(&self) {
        self.unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
        *self.handler.lock().unwrap() = None;
    }

    async fn start(&self) -> Result<(), MonitorError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(MonitorError::StartFailed("mock failure".to_string()));
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), MonitorError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_stop.load(Ordering::SeqCst) {
            return Err(MonitorError::StopFailed("mock failure".to_string()));
        }
        Ok(())
    }

    async fn set_content(&self, record: ClipboardContentRecord) -> Result<()> {
        if self.fail_set_content.load(Ordering::SeqCst) {
            anyhow::bail!("Clipboard write failed");
        }
        self.written.lock().unwrap().push(record);
        Ok(())
    }

    fn release(&self) {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Clock fixed at a settable instant.
pub struct FixedClock(AtomicI64);

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self(AtomicI64::new(now_ms))
    }

    pub fn set(&self, now_ms: i64) {
        self.0.store(now_ms, Ordering::SeqCst);
    }
}

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Extractor that fails for every record.
pub struct FailingExtractor;

#[async_trait]
impl MetadataExtractorPort for FailingExtractor {
    async fn extract(&self, _record: &ClipboardContentRecord, _id: &ItemId) -> Result<ItemMetadata> {
        anyhow::bail!("extractor unavailable")
    }
}

/// Extractor that panics on the text `"boom"` and delegates otherwise.
pub struct PanickyExtractor;

#[async_trait]
impl MetadataExtractorPort for PanickyExtractor {
    async fn extract(&self, record: &ClipboardContentRecord, id: &ItemId) -> Result<ItemMetadata> {
        if record.text.as_deref() == Some("boom") {
            panic!("extractor exploded");
        }
        BasicMetadataExtractor::new().extract(record, id).await
    }
}

/// Blob sink that never manages to write.
pub struct FailingBlobSink;

#[async_trait]
impl BlobSinkPort for FailingBlobSink {
    async fn write(&self, _data: &[u8], _extension_hint: &str) -> Result<PathBuf> {
        anyhow::bail!("disk full")
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        anyhow::bail!("no blob at {}", path.display())
    }
}

/// Wraps a store, counting calls and optionally failing or slowing them.
pub struct InstrumentedStore {
    pub inner: Arc<InMemoryItemStore>,
    pub fail_lookup: AtomicBool,
    pub fail_insert: AtomicBool,
    pub delay: Duration,
    pub insert_calls: AtomicUsize,
    pub touch_calls: AtomicUsize,
}

impl InstrumentedStore {
    pub fn new(inner: Arc<InMemoryItemStore>) -> Self {
        Self {
            inner,
            fail_lookup: AtomicBool::new(false),
            fail_insert: AtomicBool::new(false),
            delay: Duration::ZERO,
            insert_calls: AtomicUsize::new(0),
            touch_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(inner: Arc<InMemoryItemStore>, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(inner)
        }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl ItemStorePort for InstrumentedStore {
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<ClipboardItem>> {
        self.pause().await;
        if self.fail_lookup.load(Ordering::SeqCst) {
            anyhow::bail!("database is locked");
        }
        self.inner.find_by_hash(hash).await
    }

    async fn insert(&self, item: &ClipboardItem) -> Result<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_insert.load(Ordering::SeqCst) {
            anyhow::bail!("disk I/O error");
        }
        self.inner.insert(item).await
    }

    async fn touch_last_accessed(&self, id: &ItemId, at_ms: i64) -> Result<bool> {
        self.touch_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.touch_last_accessed(id, at_ms).await
    }

    async fn get_item(&self, id: &ItemId) -> Result<Option<ClipboardItem>> {
        self.inner.get_item(id).await
    }
}

/// Everything an orchestrator test needs, with in-memory defaults.
pub struct TestDeps {
    pub monitor: Arc<FakeMonitor>,
    pub store: Arc<InMemoryItemStore>,
    pub item_store: Arc<dyn ItemStorePort>,
    pub extractor: Arc<dyn MetadataExtractorPort>,
    pub blob_sink: Arc<dyn BlobSinkPort>,
    pub clock: Arc<FixedClock>,
    pub policy: MetadataFailurePolicy,
    pub blob_dir: TempDir,
}

impl TestDeps {
    pub fn new() -> Self {
        init_tracing();
        let blob_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(InMemoryItemStore::new());
        Self {
            monitor: Arc::new(FakeMonitor::new()),
            item_store: store.clone(),
            store,
            extractor: Arc::new(BasicMetadataExtractor::new()),
            blob_sink: Arc::new(FsBlobSink::new(blob_dir.path().join("blobs"))),
            clock: Arc::new(FixedClock::new(9_000_000)),
            policy: MetadataFailurePolicy::default(),
            blob_dir,
        }
    }

    pub fn build(&self) -> ClipboardCaptureOrchestrator {
        ClipboardCaptureOrchestrator::new(
            CaptureDeps {
                monitor: self.monitor.clone(),
                item_store: self.item_store.clone(),
                metadata_extractor: self.extractor.clone(),
                blob_sink: self.blob_sink.clone(),
                clock: self.clock.clone(),
            },
            self.policy,
        )
    }
}

pub fn text_event(text: &str, at_ms: i64) -> ClipboardChangeEvent {
    ClipboardChangeEvent::new(ClipboardContentRecord::text(text, at_ms))
}

pub fn files_event(paths: &[&str], at_ms: i64) -> ClipboardChangeEvent {
    ClipboardChangeEvent::new(ClipboardContentRecord::file_paths(
        paths.iter().map(|p| p.to_string()).collect(),
        at_ms,
    ))
}

pub fn image_event(bytes: &[u8], at_ms: i64) -> ClipboardChangeEvent {
    ClipboardChangeEvent::new(ClipboardContentRecord::image(bytes.to_vec(), at_ms))
}
