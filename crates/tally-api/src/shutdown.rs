use tracing::{info, warn};

/// Resolves on Ctrl+C, or SIGTERM on unix. `service` names the server in the log line.
pub async fn shutdown_signal(service: &'static str) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("{}: Ctrl+C received, shutting down", service),
                    _ = sigterm.recv() => info!("{}: SIGTERM received, shutting down", service),
                }
                return;
            }
            Err(e) => warn!("{}: SIGTERM handler unavailable ({}), Ctrl+C only", service, e),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("{}: Ctrl+C handler failed: {}", service, e);
    }
    info!("{}: shutting down", service);
}
