use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use crate::catalog::CatalogCache;

/// Shutdown signal types
#[derive(Debug, Clone, Copy)]
pub enum ShutdownSignal {
    /// Graceful shutdown (drain connections, clean up)
    Graceful,
}

/// Setup signal handlers for the server
///
/// Returns a broadcast sender for shutdown signals and a join handle for the signal task
///
/// Handles:
/// - SIGTERM/SIGINT: Graceful shutdown
/// - SIGHUP: Plan catalog reload
#[cfg(unix)]
pub fn setup_signal_handlers(
    catalog: Arc<CatalogCache>,
) -> (
    broadcast::Sender<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, _) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(async move {
        let (mut sigterm, mut sigint, mut sighup) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::hangup()),
        ) {
            (Ok(term), Ok(int), Ok(hup)) => (term, int, hup),
            _ => {
                error!("Failed to install signal handlers, falling back to Ctrl+C only");
                wait_for_ctrl_c(tx_clone).await;
                return;
            }
        };

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("SIGTERM received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sigint.recv() => {
                    info!("SIGINT received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sighup.recv() => {
                    info!("SIGHUP received, reloading plan catalog");
                    match catalog.reload().await {
                        Ok(loaded) => info!("Plan catalog reloaded: {} plans", loaded.len()),
                        Err(e) => error!("Failed to reload plan catalog: {}", e),
                    }
                }
            }
        }
    });

    (shutdown_tx, handle)
}

/// Non-unix platforms only get Ctrl+C
#[cfg(not(unix))]
pub fn setup_signal_handlers(
    _catalog: Arc<CatalogCache>,
) -> (
    broadcast::Sender<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, _) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(wait_for_ctrl_c(tx_clone));

    (shutdown_tx, handle)
}

async fn wait_for_ctrl_c(tx: broadcast::Sender<ShutdownSignal>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Ctrl+C received, initiating shutdown");
            let _ = tx.send(ShutdownSignal::Graceful);
        }
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_setup_signal_handlers() {
        let catalog = Arc::new(CatalogCache::new("plans.csv", Duration::from_secs(300)));
        let (shutdown_tx, handle) = setup_signal_handlers(catalog);

        let mut rx = shutdown_tx.subscribe();
        shutdown_tx.send(ShutdownSignal::Graceful).unwrap();

        let received = rx.recv().await.unwrap();
        assert!(matches!(received, ShutdownSignal::Graceful));
        handle.abort();
    }
}
