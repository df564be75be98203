//! Clipvault Application Orchestration Layer
//!
//! This crate contains the capture pipeline use cases and the orchestrator
//! that ties them to the clipboard monitor.

pub mod app_paths;
pub mod deps;
pub mod error;
pub mod orchestrator;
pub mod usecases;

pub use app_paths::AppPaths;
pub use deps::CaptureDeps;
pub use error::CaptureError;
pub use orchestrator::ClipboardCaptureOrchestrator;
pub use usecases::clipboard::{CaptureClipboardUseCase, CaptureOutcome, CopyItemToSystemClipboard};
