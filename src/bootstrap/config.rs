//! Configuration loading.
//!
//! `load_config` only reads and maps the file; it accepts whatever the file
//! says. `resolve_config` decides which file to read and fills empty facts
//! with system defaults.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

use cv_core::config::AppConfig;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// No validation is performed: empty strings and missing sections come back
/// as empty values.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Pick the config file and merge it over the system defaults for
/// `data_dir`.
///
/// An explicit path must exist. Without one, `<data_dir>/config.toml` is
/// used when present and the system defaults otherwise.
pub fn resolve_config(explicit_path: Option<PathBuf>, data_dir: &Path) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::with_system_defaults(data_dir.to_path_buf());

    let config_path = match explicit_path {
        Some(path) => path,
        None => {
            let default_path = data_dir.join(CONFIG_FILE_NAME);
            if !default_path.exists() {
                info!(path = %default_path.display(), "No config file, using system defaults");
                return Ok(defaults);
            }
            default_path
        }
    };

    let loaded = load_config(config_path.clone())?;
    info!(path = %config_path.display(), "Loaded config file");
    Ok(fill_empty_with(loaded, defaults))
}

fn fill_empty_with(config: AppConfig, defaults: AppConfig) -> AppConfig {
    AppConfig {
        storage_backend: non_empty(config.storage_backend, defaults.storage_backend),
        database_path: non_empty_path(config.database_path, defaults.database_path),
        blob_dir: non_empty_path(config.blob_dir, defaults.blob_dir),
        metadata_failure_policy: non_empty(
            config.metadata_failure_policy,
            defaults.metadata_failure_policy,
        ),
        start_paused: config.start_paused,
    }
}

fn non_empty(value: String, fallback: String) -> String {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn non_empty_path(value: PathBuf, fallback: PathBuf) -> PathBuf {
    if value.as_os_str().is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            [storage]
            backend = "memory"
            database_path = "/path/to/db.sqlite"
            blob_dir = "/path/to/blobs"

            [capture]
            metadata_failure_policy = "drop_item"
            start_paused = true
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.storage_backend, "memory");
        assert_eq!(config.database_path, PathBuf::from("/path/to/db.sqlite"));
        assert_eq!(config.blob_dir, PathBuf::from("/path/to/blobs"));
        assert_eq!(config.metadata_failure_policy, "drop_item");
        assert!(config.start_paused);
    }

    #[test]
    fn test_load_config_returns_empty_values_when_missing() {
        let temp_file = write_config("[storage]\n[capture]\n");

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_does_not_validate_values() {
        let temp_file = write_config(
            r#"
            [capture]
            metadata_failure_policy = "shred_everything"
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.metadata_failure_policy, "shred_everything");
    }

    #[test]
    fn test_load_config_fails_on_invalid_toml() {
        let temp_file = write_config("[storage\nbackend = ");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_fails_on_missing_file() {
        let err = load_config(PathBuf::from("/nonexistent/clipvault.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_resolve_without_file_uses_system_defaults() {
        let data_dir = TempDir::new().unwrap();

        let config = resolve_config(None, data_dir.path()).unwrap();

        assert_eq!(
            config,
            AppConfig::with_system_defaults(data_dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_resolve_reads_default_config_file() {
        let data_dir = TempDir::new().unwrap();
        std::fs::write(
            data_dir.path().join(CONFIG_FILE_NAME),
            "[capture]\nstart_paused = true\n",
        )
        .unwrap();

        let config = resolve_config(None, data_dir.path()).unwrap();

        assert!(config.start_paused);
        assert_eq!(config.database_path, data_dir.path().join("clipvault.db"));
        assert_eq!(config.storage_backend, "sqlite");
    }

    #[test]
    fn test_resolve_explicit_file_overrides_defaults() {
        let data_dir = TempDir::new().unwrap();
        let temp_file = write_config(
            r#"
            [storage]
            blob_dir = "/elsewhere/blobs"
        "#,
        );

        let config =
            resolve_config(Some(temp_file.path().to_path_buf()), data_dir.path()).unwrap();

        assert_eq!(config.blob_dir, PathBuf::from("/elsewhere/blobs"));
        assert_eq!(config.database_path, data_dir.path().join("clipvault.db"));
        assert_eq!(config.metadata_failure_policy, "save_without_metadata");
    }

    #[test]
    fn test_resolve_explicit_missing_file_is_an_error() {
        let data_dir = TempDir::new().unwrap();

        let result = resolve_config(Some(data_dir.path().join("missing.toml")), data_dir.path());

        assert!(result.is_err());
    }
}
