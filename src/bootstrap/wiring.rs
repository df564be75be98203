//! Dependency wiring: turn an `AppConfig` into a ready orchestrator.
//!
//! Config strings are interpreted here. Unknown values fall back to the
//! defaults with a warning; I/O failures surface as `WiringError`.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use cv_app::{CaptureDeps, ClipboardCaptureOrchestrator};
use cv_core::config::AppConfig;
use cv_core::ports::{ClipboardMonitorPort, ItemStorePort};
use cv_core::{MetadataFailurePolicy, StoreBackend};
use cv_infra::db::executor::DieselSqliteExecutor;
use cv_infra::db::pool::{init_db_pool, DbPool};
use cv_infra::{
    BasicMetadataExtractor, DieselItemRepository, FsBlobSink, InMemoryItemStore, SystemClock,
};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("Blob storage initialization failed: {0}")]
    BlobStorageInit(String),
}

pub fn resolve_backend(value: &str) -> StoreBackend {
    value.parse().unwrap_or_else(|err| {
        warn!(value, error = %err, "Unknown storage backend, using default");
        StoreBackend::default()
    })
}

pub fn resolve_policy(value: &str) -> MetadataFailurePolicy {
    value.parse().unwrap_or_else(|err| {
        warn!(value, error = %err, "Unknown metadata failure policy, using default");
        MetadataFailurePolicy::default()
    })
}

fn create_db_pool(db_path: &Path) -> WiringResult<DbPool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            WiringError::DatabaseInit(format!("Failed to create DB directory: {}", e))
        })?;
    }

    let db_url = db_path
        .to_str()
        .ok_or_else(|| WiringError::DatabaseInit("Invalid database path".to_string()))?;

    init_db_pool(db_url)
        .map_err(|e| WiringError::DatabaseInit(format!("Failed to initialize DB: {}", e)))
}

pub fn create_item_store(config: &AppConfig) -> WiringResult<Arc<dyn ItemStorePort>> {
    match resolve_backend(&config.storage_backend) {
        StoreBackend::Sqlite => {
            let pool = create_db_pool(&config.database_path)?;
            info!(path = %config.database_path.display(), "Using SQLite item store");
            Ok(Arc::new(DieselItemRepository::new(DieselSqliteExecutor::new(pool))))
        }
        StoreBackend::Memory => {
            info!("Using in-memory item store, history is lost on exit");
            Ok(Arc::new(InMemoryItemStore::new()))
        }
    }
}

/// Build the capture orchestrator around `monitor`. The orchestrator is
/// subscribed but not started.
pub fn wire_orchestrator(
    config: &AppConfig,
    monitor: Arc<dyn ClipboardMonitorPort>,
) -> WiringResult<ClipboardCaptureOrchestrator> {
    std::fs::create_dir_all(&config.blob_dir).map_err(|e| {
        WiringError::BlobStorageInit(format!(
            "Failed to create blob directory {}: {}",
            config.blob_dir.display(),
            e
        ))
    })?;

    let deps = CaptureDeps {
        monitor,
        item_store: create_item_store(config)?,
        metadata_extractor: Arc::new(BasicMetadataExtractor::new()),
        blob_sink: Arc::new(FsBlobSink::new(config.blob_dir.clone())),
        clock: Arc::new(SystemClock),
    };
    let policy = resolve_policy(&config.metadata_failure_policy);
    info!(policy = policy.as_str(), "Capture pipeline wired");

    Ok(ClipboardCaptureOrchestrator::new(deps, policy))
}
