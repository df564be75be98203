use std::future::Future;

use anyhow::Context;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use cv_app::ClipboardCaptureOrchestrator;

/// Run the daemon until Ctrl-C.
pub async fn run_daemon(
    orchestrator: ClipboardCaptureOrchestrator,
    start_paused: bool,
) -> anyhow::Result<()> {
    run_until(orchestrator, start_paused, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl-C, shutting down");
        }
    })
    .await
}

/// Start monitoring unless `start_paused`, log every new item, and tear the
/// orchestrator down once `shutdown` resolves.
pub async fn run_until<F>(
    orchestrator: ClipboardCaptureOrchestrator,
    start_paused: bool,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let mut item_added = orchestrator.subscribe_item_added();
    let announcer = tokio::spawn(async move {
        loop {
            match item_added.recv().await {
                Ok(item) => info!(
                    item_id = %item.id,
                    kind = %item.content_type,
                    preview = %item.preview_text,
                    "New clipboard item"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Item announcements lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    if start_paused {
        info!("Starting paused, clipboard monitoring is off");
    } else {
        orchestrator
            .start_monitoring()
            .await
            .context("Failed to start clipboard monitoring")?;
    }

    shutdown.await;
    info!("Shutdown requested");

    if let Err(err) = orchestrator.stop_monitoring().await {
        warn!(error = %err, "Failed to stop clipboard monitoring cleanly");
    }
    orchestrator.dispose();
    announcer.abort();

    info!("Clipvault stopped");
    Ok(())
}
