//! Port interfaces for the application layer
//!
//! Ports define the contract between the capture pipeline (use cases) and
//! the infrastructure/platform implementations. The pipeline only ever sees
//! these traits, so every adapter can be swapped for an in-memory fake.

pub mod app_dirs;
mod blob_sink;
mod clipboard_change_handler;
mod clipboard_monitor;
mod clock;
pub mod errors;
mod item_store;
mod metadata_extractor;

pub use app_dirs::AppDirsPort;
pub use blob_sink::BlobSinkPort;
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use clipboard_monitor::{ClipboardMonitorPort, MonitorError};
pub use clock::*;
pub use errors::AppDirsError;
pub use item_store::ItemStorePort;
pub use metadata_extractor::MetadataExtractorPort;
