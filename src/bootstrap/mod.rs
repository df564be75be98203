pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config};
pub use run::{run_daemon, run_until};
pub use wiring::{wire_orchestrator, WiringError};
