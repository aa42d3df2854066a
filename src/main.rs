mod bootstrap;

use crate::bootstrap::{config, logging, scan};
use dirsift::prelude::{EventBus, ScanEvent};
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let events = EventBus::new(true);
    events.emit(ScanEvent::Starting);

    let config_path = std::env::var("DIRSIFT_CONFIG").unwrap_or_else(|_| "dirsift.toml".to_string());
    let config = config::load(&config_path, &events).await?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let signal_handle = {
        let interrupted = Arc::clone(&interrupted);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Interrupt received, stopping scan...");
                    interrupted.store(true, Ordering::SeqCst);
                }
                Err(e) => tracing::warn!("Failed to install Ctrl+C handler: {}", e),
            }
        })
    };

    // reqwest's blocking client must be built and dropped off the runtime
    let outcome = {
        let events = Arc::clone(&events);
        let interrupted = Arc::clone(&interrupted);
        tokio::task::spawn_blocking(move || scan::run(&config, &events, &interrupted)).await?
    };
    signal_handle.abort();

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            events.emit(ScanEvent::Error {
                context: "Scan failed".to_string(),
                error: format!("{:#}", e),
            });
            return Err(e);
        }
    };

    match outcome.reports.save().await {
        Ok(paths) => {
            for path in paths {
                events.emit(ScanEvent::ReportSaved {
                    path: path.display().to_string(),
                });
            }
        }
        Err(e) => events.emit(ScanEvent::Error {
            context: "Failed to save reports".to_string(),
            error: e.to_string(),
        }),
    }

    Ok(())
}
