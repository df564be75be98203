use cv_core::ports::MonitorError;

/// Errors surfaced by the orchestrator's public operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("capture orchestrator has been disposed")]
    Disposed,

    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
