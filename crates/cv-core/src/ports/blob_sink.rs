use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait BlobSinkPort: Send + Sync {
    /// Write `data` under a freshly generated unique name ending in
    /// `.<extension_hint>` and return the stored path.
    async fn write(&self, data: &[u8], extension_hint: &str) -> Result<PathBuf>;

    /// Read back the bytes of a blob previously returned by `write`.
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;
}
