use std::sync::Arc;

use async_trait::async_trait;

use super::ClipboardChangeHandler;
use crate::clipboard::ClipboardContentRecord;

/// Port over the system clipboard: change notifications in, content out.
///
/// # Behavior
/// - `start()` / `stop()` are NOT required to be idempotent; callers track
///   the monitoring state themselves.
/// - At most one handler is subscribed; `subscribe` replaces any previous one.
/// - `release()` frees platform resources and must be safe to call twice.
#[async_trait]
pub trait ClipboardMonitorPort: Send + Sync {
    /// Register the handler that receives change notifications.
    fn subscribe(&self, handler: Arc<dyn ClipboardChangeHandler>);

    /// Drop the registered handler. Later notifications are discarded.
    fn unsubscribe(&self);

    /// Begin watching the system clipboard.
    async fn start(&self) -> Result<(), MonitorError>;

    /// Stop watching the system clipboard.
    async fn stop(&self) -> Result<(), MonitorError>;

    /// Overwrite the system clipboard with `record`.
    async fn set_content(&self, record: ClipboardContentRecord) -> anyhow::Result<()>;

    /// Release the underlying platform resources.
    fn release(&self);
}

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Failed to start clipboard monitor: {0}")]
    StartFailed(String),

    #[error("Failed to stop clipboard monitor: {0}")]
    StopFailed(String),

    #[error("Clipboard monitor already released")]
    Released,
}
