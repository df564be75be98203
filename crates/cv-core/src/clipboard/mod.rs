//! Clipboard domain models.
mod content;
mod hash;
mod item;
pub mod meta_keys;
mod metadata;
pub mod preview;

pub use content::{ClipboardChangeEvent, ClipboardContentRecord, ContentKind};
pub use hash::{ContentHash, FILE_PATH_HASH_SEPARATOR};
pub use item::ClipboardItem;
pub use metadata::ItemMetadata;
