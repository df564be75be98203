use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::ClipboardContentRecord;

/// Separator used when hashing file path lists.
pub const FILE_PATH_HASH_SEPARATOR: &str = "|";

/// SHA-256 digest of a content record, rendered as 64 uppercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(hex::encode_upper(digest))
    }

    /// Wrap an already rendered digest, e.g. one read back from storage.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ClipboardContentRecord {
    /// Dedup key of this record.
    ///
    /// Canonicalization priority, first match wins:
    /// 1. image bytes, exactly as captured
    /// 2. non-empty file paths joined with `|`, capture order kept
    /// 3. non-empty text
    /// 4. the empty byte sequence
    pub fn content_hash(&self) -> ContentHash {
        if let Some(bytes) = &self.image_bytes {
            return ContentHash::of_bytes(bytes);
        }
        if let Some(paths) = self.non_empty_file_paths() {
            return ContentHash::of_bytes(paths.join(FILE_PATH_HASH_SEPARATOR).as_bytes());
        }
        if let Some(text) = self.non_empty_text() {
            return ContentHash::of_bytes(text.as_bytes());
        }
        ContentHash::of_bytes(&[])
    }
}
