use clipboard_rs::{ClipboardContext, ClipboardHandler};
use cv_core::ClipboardContentRecord;
use tokio::sync::mpsc;

use super::common::CommonClipboardImpl;

/// Watcher-thread handler: reads the clipboard on every change and hands
/// the record to the async side without blocking.
pub struct RecordForwarder {
    sender: mpsc::Sender<ClipboardContentRecord>,
}

impl RecordForwarder {
    pub fn new(sender: mpsc::Sender<ClipboardContentRecord>) -> Self {
        Self { sender }
    }

    fn forward(&self, record: ClipboardContentRecord) {
        if let Err(e) = self.sender.try_send(record) {
            log::warn!("dropping clipboard change, dispatcher unavailable: {}", e);
        }
    }
}

impl ClipboardHandler for RecordForwarder {
    fn on_clipboard_change(&mut self) {
        let mut ctx = match ClipboardContext::new() {
            Ok(ctx) => ctx,
            Err(e) => {
                log::warn!("failed to open clipboard context: {}", e);
                return;
            }
        };

        match CommonClipboardImpl::read_record(&mut ctx) {
            Ok(record) => self.forward(record),
            Err(e) => log::warn!("failed to read clipboard record: {}", e),
        }
    }
}
