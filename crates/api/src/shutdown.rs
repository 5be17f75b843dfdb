//! Graceful shutdown on SIGINT / SIGTERM.

use walletd_observability::Logger;

/// Resolves on the first SIGINT (Ctrl-C) or, on Unix, SIGTERM.
pub async fn shutdown_signal(logger: Logger) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            logger.in_scope(|| tracing::error!(error = %e, "failed to listen for ctrl-c"));
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                logger.in_scope(|| tracing::error!(error = %e, "failed to listen for SIGTERM"));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    logger.in_scope(|| tracing::info!("shutdown signal received"));
}
