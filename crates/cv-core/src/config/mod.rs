//! # Pure Data Module - Data Transfer Objects Only
//!
//! Configuration data structures and the TOML -> DTO mapping.
//!
//! This module carries no validation and no policy: empty strings and
//! missing sections are valid facts. Interpreting them (falling back to
//! system defaults, rejecting unknown values) is the job of the wiring layer.

use std::path::PathBuf;
use std::str::FromStr;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Item store backend name, as written in the file (`sqlite` / `memory`)
    pub storage_backend: String,

    /// SQLite database path (path info only, no existence check)
    pub database_path: PathBuf,

    /// Directory receiving image blobs
    pub blob_dir: PathBuf,

    /// Metadata failure policy name, as written in the file
    pub metadata_failure_policy: String,

    /// Do not start monitoring when the daemon boots
    pub start_paused: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// Must NOT contain validation or default value logic.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let storage = toml_value.get("storage");
        let capture = toml_value.get("capture");

        let str_at = |section: Option<&toml::Value>, key: &str| {
            section
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            storage_backend: str_at(storage, "backend"),
            database_path: PathBuf::from(str_at(storage, "database_path")),
            blob_dir: PathBuf::from(str_at(storage, "blob_dir")),
            metadata_failure_policy: str_at(capture, "metadata_failure_policy"),
            start_paused: capture
                .and_then(|c| c.get("start_paused"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            storage_backend: String::new(),
            database_path: PathBuf::new(),
            blob_dir: PathBuf::new(),
            metadata_failure_policy: String::new(),
            start_paused: false,
        }
    }

    /// Create AppConfig with system-default paths for production use
    ///
    /// `data_dir` is computed by the caller (e.g. through the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            storage_backend: StoreBackend::Sqlite.as_str().to_string(),
            database_path: data_dir.join("clipvault.db"),
            blob_dir: data_dir.join("blobs"),
            metadata_failure_policy: MetadataFailurePolicy::default().as_str().to_string(),
            start_paused: false,
        }
    }
}

/// What the capture pipeline does when metadata extraction fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataFailurePolicy {
    /// Persist the item without metadata and log a warning.
    #[default]
    SaveWithoutMetadata,
    /// Fail the capture; nothing is persisted.
    DropItem,
}

impl MetadataFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataFailurePolicy::SaveWithoutMetadata => "save_without_metadata",
            MetadataFailurePolicy::DropItem => "drop_item",
        }
    }
}

impl FromStr for MetadataFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "save_without_metadata" => Ok(MetadataFailurePolicy::SaveWithoutMetadata),
            "drop_item" => Ok(MetadataFailurePolicy::DropItem),
            other => Err(anyhow::anyhow!("unknown metadata failure policy: {other}")),
        }
    }
}

/// Item store implementation selected at wiring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Memory => "memory",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!("unknown storage backend: {other}")),
        }
    }
}
