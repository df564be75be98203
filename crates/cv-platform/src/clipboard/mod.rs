mod common;
mod watcher;

pub use common::{file_uri_to_path, ClipboardReading, CommonClipboardImpl};
pub use watcher::RecordForwarder;
