//! # cv-core
//!
//! Core domain models and port contracts for Clipvault.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the clipboard content record, the persisted history item, the dedup hash,
//! preview derivation, and the ports implemented by the infra and platform layers.

pub mod app_dirs;
pub mod clipboard;
pub mod config;
pub mod ids;
pub mod ports;

// Re-export commonly used types at the crate root
pub use clipboard::{
    ClipboardChangeEvent, ClipboardContentRecord, ClipboardItem, ContentHash, ContentKind,
    ItemMetadata,
};
pub use config::{AppConfig, MetadataFailurePolicy, StoreBackend};
pub use ids::ItemId;
