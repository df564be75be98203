//! # cv-infra
//!
//! Infrastructure adapters for the Clipvault ports: filesystem blob sink,
//! in-memory and SQLite item stores, the basic metadata extractor and the
//! system clock.

pub mod blob;
pub mod db;
pub mod memory;
pub mod metadata;
pub mod time;

pub use blob::FsBlobSink;
pub use db::repositories::DieselItemRepository;
pub use memory::InMemoryItemStore;
pub use metadata::BasicMetadataExtractor;
pub use time::SystemClock;
