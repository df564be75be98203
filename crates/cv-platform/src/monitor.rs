//! System clipboard monitor built on the `clipboard-rs` watcher.
//!
//! The watcher blocks its own thread, so it runs under `spawn_blocking` and
//! pushes records into a bounded channel. A dispatcher task drains the
//! channel and hands each change to the subscribed handler on a fresh task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clipboard_rs::{
    ClipboardContext, ClipboardWatcher as RSClipboardWatcher, ClipboardWatcherContext,
    WatcherShutdown,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use cv_core::ports::{ClipboardChangeHandler, ClipboardMonitorPort, MonitorError};
use cv_core::{ClipboardChangeEvent, ClipboardContentRecord};

use crate::clipboard::{CommonClipboardImpl, RecordForwarder};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

type HandlerSlot = Arc<Mutex<Option<Arc<dyn ClipboardChangeHandler>>>>;

struct RunningWatcher {
    shutdown: WatcherShutdown,
    watcher_join: JoinHandle<()>,
    dispatcher_join: JoinHandle<()>,
}

pub struct SystemClipboardMonitor {
    handler: HandlerSlot,
    running: Mutex<Option<RunningWatcher>>,
    released: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SystemClipboardMonitor {
    pub fn new() -> Self {
        Self {
            handler: Arc::new(Mutex::new(None)),
            running: Mutex::new(None),
            released: AtomicBool::new(false),
        }
    }

    pub fn is_watching(&self) -> bool {
        lock(&self.running).is_some()
    }

    fn ensure_not_released(&self) -> Result<(), MonitorError> {
        if self.released.load(Ordering::SeqCst) {
            return Err(MonitorError::Released);
        }
        Ok(())
    }
}

impl Default for SystemClipboardMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain `rx`, spawning the current handler for every record.
///
/// Records arriving while nobody is subscribed are discarded. The task ends
/// once every sender is gone.
fn spawn_dispatcher(
    mut rx: mpsc::Receiver<ClipboardContentRecord>,
    handler: HandlerSlot,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(record) = rx.recv().await {
            let current = lock(&handler).clone();
            match current {
                Some(handler) => {
                    debug!(kind = %record.kind, "Dispatching clipboard change");
                    tokio::spawn(async move {
                        handler
                            .on_clipboard_changed(ClipboardChangeEvent::new(record))
                            .await;
                    });
                }
                None => {
                    debug!(kind = %record.kind, "Clipboard changed but no handler subscribed");
                }
            }
        }
        debug!("Clipboard dispatcher finished");
    })
}

#[async_trait]
impl ClipboardMonitorPort for SystemClipboardMonitor {
    fn subscribe(&self, handler: Arc<dyn ClipboardChangeHandler>) {
        *lock(&self.handler) = Some(handler);
    }

    fn unsubscribe(&self) {
        lock(&self.handler).take();
    }

    async fn start(&self) -> Result<(), MonitorError> {
        self.ensure_not_released()?;

        let mut running = lock(&self.running);
        if running.is_some() {
            debug!("Clipboard watcher already running, skipping start");
            return Ok(());
        }

        let mut watcher_ctx = ClipboardWatcherContext::new()
            .map_err(|e| MonitorError::StartFailed(format!("watcher context: {e}")))?;

        let (tx, rx) = mpsc::channel(CHANGE_CHANNEL_CAPACITY);
        let shutdown = watcher_ctx
            .add_handler(RecordForwarder::new(tx))
            .get_shutdown_channel();

        let dispatcher_join = spawn_dispatcher(rx, self.handler.clone());
        let watcher_join = tokio::task::spawn_blocking(move || {
            info!("start clipboard watch");
            watcher_ctx.start_watch();
            info!("clipboard watch stopped");
        });

        *running = Some(RunningWatcher {
            shutdown,
            watcher_join,
            dispatcher_join,
        });
        Ok(())
    }

    async fn stop(&self) -> Result<(), MonitorError> {
        self.ensure_not_released()?;

        let Some(watcher) = lock(&self.running).take() else {
            debug!("Clipboard watcher not running, skipping stop");
            return Ok(());
        };

        watcher.shutdown.stop();
        watcher
            .watcher_join
            .await
            .map_err(|e| MonitorError::StopFailed(format!("watcher thread: {e}")))?;
        // Handlers already spawned keep running; only the dispatch loop ends.
        if let Err(e) = watcher.dispatcher_join.await {
            warn!(error = %e, "Clipboard dispatcher ended abnormally");
        }
        info!("Clipboard watcher stopped");
        Ok(())
    }

    async fn set_content(&self, record: ClipboardContentRecord) -> Result<()> {
        if self.released.load(Ordering::SeqCst) {
            return Err(anyhow!(MonitorError::Released));
        }

        tokio::task::spawn_blocking(move || {
            let mut ctx = ClipboardContext::new().map_err(|e| anyhow!(e))?;
            CommonClipboardImpl::write_record(&mut ctx, record)
        })
        .await
        .map_err(|e| anyhow!("clipboard write task failed: {e}"))?
    }

    fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }

        lock(&self.handler).take();
        if let Some(watcher) = lock(&self.running).take() {
            watcher.shutdown.stop();
            info!("Clipboard watcher released");
        }
    }
}
