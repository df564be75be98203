use anyhow::Result;
use async_trait::async_trait;
use cv_core::ports::BlobSinkPort;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;

const FALLBACK_EXTENSION: &str = "bin";
const TEMP_SUFFIX: &str = "tmp";

#[derive(Debug, thiserror::Error)]
pub enum BlobSinkError {
    #[error("blob path {0} is outside the blob directory")]
    OutsideRoot(PathBuf),
}

/// Filesystem blob sink: one file per blob, `<root>/<uuid>.<ext>`.
pub struct FsBlobSink {
    root: PathBuf,
}

impl FsBlobSink {
    /// Create a new FsBlobSink writing into `root`.
    ///
    /// The directory is created on first write.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Lowercase ASCII alphanumerics only; anything else falls back to `bin`.
fn sanitize_extension(hint: &str) -> String {
    let ext: String = hint
        .trim_start_matches('.')
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if ext.is_empty() {
        FALLBACK_EXTENSION.to_string()
    } else {
        ext
    }
}

/// `path` names something under `root` using plain names only, so `..` or
/// `.` segments after the root are refused.
fn is_within(root: &Path, path: &Path) -> bool {
    match path.strip_prefix(root) {
        Ok(rest) => {
            rest.components().next().is_some()
                && rest.components().all(|c| matches!(c, Component::Normal(_)))
        }
        Err(_) => false,
    }
}

#[async_trait]
impl BlobSinkPort for FsBlobSink {
    /// Writes the bytes to a temporary file, then renames it into place so a
    /// blob is never observed half-written.
    async fn write(&self, data: &[u8], extension_hint: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).await?;

        let file_name = format!(
            "{}.{}",
            uuid::Uuid::new_v4(),
            sanitize_extension(extension_hint)
        );
        let final_path = self.root.join(&file_name);
        let temp_path = self.root.join(format!(".{file_name}.{TEMP_SUFFIX}"));

        fs::write(&temp_path, data).await?;
        if let Err(err) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(err.into());
        }

        debug!(path = %final_path.display(), size = data.len(), "blob written");
        Ok(final_path)
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        if !is_within(&self.root, path) {
            return Err(BlobSinkError::OutsideRoot(path.to_path_buf()).into());
        }
        Ok(fs::read(path).await?)
    }
}
