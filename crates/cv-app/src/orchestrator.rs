//! Capture orchestrator: monitor lifecycle plus the change handler.
//!
//! The orchestrator subscribes its handler when constructed and releases the
//! monitor exactly once, through `dispose()` or on drop.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, info_span, Instrument};

use cv_core::ports::{ClipboardChangeHandler, ClipboardMonitorPort};
use cv_core::{ClipboardChangeEvent, ClipboardItem, MetadataFailurePolicy};

use crate::deps::CaptureDeps;
use crate::error::CaptureError;
use crate::usecases::clipboard::{CaptureClipboardUseCase, CaptureOutcome, CopyItemToSystemClipboard};

/// Handler registered with the monitor.
///
/// Every error and panic of the capture pipeline stops here; the monitor
/// never sees a failure and stays subscribed.
struct CaptureChangeHandler {
    capture: Arc<CaptureClipboardUseCase>,
}

#[async_trait]
impl ClipboardChangeHandler for CaptureChangeHandler {
    async fn on_clipboard_changed(&self, event: ClipboardChangeEvent) {
        let kind = event.content.kind;
        match AssertUnwindSafe(self.capture.execute(event))
            .catch_unwind()
            .await
        {
            Ok(Ok(CaptureOutcome::Created(item))) => {
                debug!(item_id = %item.id, "Clipboard change captured");
            }
            Ok(Ok(CaptureOutcome::Touched(item_id))) => {
                debug!(item_id = %item_id, "Clipboard change matched existing item");
            }
            Ok(Err(err)) => {
                error!(kind = %kind, error = ?err, "Failed to capture clipboard change, event dropped");
            }
            Err(_) => {
                error!(kind = %kind, "Clipboard capture panicked, event dropped");
            }
        }
    }
}

pub struct ClipboardCaptureOrchestrator {
    monitor: Arc<dyn ClipboardMonitorPort>,
    capture: Arc<CaptureClipboardUseCase>,
    copy_item: CopyItemToSystemClipboard,
    /// Serializes start/stop so the monitor never sees overlapping calls.
    lifecycle: Mutex<()>,
    monitoring: AtomicBool,
    disposed: AtomicBool,
}

impl ClipboardCaptureOrchestrator {
    /// Build the pipeline and subscribe it to the monitor.
    ///
    /// Monitoring is not started; call [`start_monitoring`](Self::start_monitoring).
    pub fn new(deps: CaptureDeps, metadata_failure_policy: MetadataFailurePolicy) -> Self {
        let capture = Arc::new(CaptureClipboardUseCase::new(
            deps.item_store.clone(),
            deps.metadata_extractor,
            deps.blob_sink.clone(),
            metadata_failure_policy,
        ));
        let copy_item = CopyItemToSystemClipboard::new(
            deps.monitor.clone(),
            deps.item_store,
            deps.blob_sink,
            deps.clock,
        );

        deps.monitor.subscribe(Arc::new(CaptureChangeHandler {
            capture: capture.clone(),
        }));

        Self {
            monitor: deps.monitor,
            capture,
            copy_item,
            lifecycle: Mutex::new(()),
            monitoring: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
        }
    }

    /// Start watching the clipboard.
    ///
    /// Starting while already monitoring is a no-op and does not reach the
    /// monitor. A monitor failure is returned and the status stays `false`.
    pub async fn start_monitoring(&self) -> Result<(), CaptureError> {
        let span = info_span!("usecase.start_monitoring.execute");

        async {
            let _lifecycle = self.lifecycle.lock().await;
            self.ensure_not_disposed()?;

            if self.monitoring.load(Ordering::SeqCst) {
                debug!("Clipboard monitoring already running, skipping start");
                return Ok(());
            }

            self.monitor.start().await?;
            self.monitoring.store(true, Ordering::SeqCst);
            info!("Clipboard monitoring started");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Stop watching the clipboard. Stopping while stopped is a no-op.
    ///
    /// Captures already in flight run to completion.
    pub async fn stop_monitoring(&self) -> Result<(), CaptureError> {
        let span = info_span!("usecase.stop_monitoring.execute");

        async {
            let _lifecycle = self.lifecycle.lock().await;
            self.ensure_not_disposed()?;

            if !self.monitoring.load(Ordering::SeqCst) {
                debug!("Clipboard monitoring not running, skipping stop");
                return Ok(());
            }

            self.monitor.stop().await?;
            self.monitoring.store(false, Ordering::SeqCst);
            info!("Clipboard monitoring stopped");
            Ok(())
        }
        .instrument(span)
        .await
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Put `item` back on the system clipboard and touch its access time.
    pub async fn copy_out(&self, item: &ClipboardItem) -> Result<(), CaptureError> {
        self.ensure_not_disposed()?;
        self.copy_item.execute(item).await?;
        Ok(())
    }

    /// At most one message per newly created item, never for duplicates.
    /// A lagging receiver skips items; read the store to catch up.
    pub fn subscribe_item_added(&self) -> broadcast::Receiver<ClipboardItem> {
        self.capture.subscribe_item_added()
    }

    /// Unsubscribe from the monitor and release it.
    ///
    /// Idempotent: only the first call reaches the monitor. Never fails.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.monitor.unsubscribe();
        self.monitor.release();
        self.monitoring.store(false, Ordering::SeqCst);
        info!("Clipboard capture orchestrator disposed");
    }

    fn ensure_not_disposed(&self) -> Result<(), CaptureError> {
        if self.is_disposed() {
            return Err(CaptureError::Disposed);
        }
        Ok(())
    }
}

impl Drop for ClipboardCaptureOrchestrator {
    fn drop(&mut self) {
        self.dispose();
    }
}
