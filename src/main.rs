use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use clipvault_lib::bootstrap::{self, tracing::init_tracing_subscriber};
use cv_app::AppPaths;
use cv_core::ports::AppDirsPort;
use cv_platform::{DirsAppDirsAdapter, SystemClipboardMonitor};

/// Clipboard history daemon.
#[derive(Debug, Parser)]
#[command(name = "clipvault", version, about)]
struct Cli {
    /// Config file (default: <data dir>/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Boot without monitoring the clipboard
    #[arg(long)]
    paused: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_dirs = DirsAppDirsAdapter::new()
        .get_app_dirs()
        .context("Failed to resolve the application data directory")?;
    let paths = AppPaths::from_app_dirs(&app_dirs);
    let data_dir = app_dirs.app_data_root;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    if let Err(err) = init_tracing_subscriber(&paths.logs_dir) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let config = bootstrap::resolve_config(cli.config, &data_dir)?;
    tracing::info!(
        data_dir = %data_dir.display(),
        database = %config.database_path.display(),
        default_config = %paths.config_path.display(),
        "Clipvault starting"
    );
    let start_paused = cli.paused || config.start_paused;

    let monitor = Arc::new(SystemClipboardMonitor::new());
    let orchestrator = bootstrap::wire_orchestrator(&config, monitor)?;

    bootstrap::run_daemon(orchestrator, start_paused).await
}
