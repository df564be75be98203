//! Clipboard change handler port
//!
//! The platform monitor (low-level) depends on this abstraction and the
//! application layer (high-level) implements it.

use crate::clipboard::ClipboardChangeEvent;

/// Callback handler for clipboard change events.
///
/// Implementations must not fail towards the caller: the monitor has no way
/// to recover from a handler error, so every failure is dealt with inside.
#[async_trait::async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    /// Called once per clipboard change, with the content already read.
    async fn on_clipboard_changed(&self, event: ClipboardChangeEvent);
}
