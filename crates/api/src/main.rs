use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Notify;

use walletd_api::{app, shutdown};
use walletd_infra::Config;
use walletd_observability::Logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    let logger = Logger::new(&config.logging);
    logger.install_as_process_default();

    let service = app::services::build_services(&config, &logger)
        .await
        .context("failed to initialise wallet storage")?;

    let app = app::build_app(service, logger.clone());

    let addr = config.http_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    logger.in_scope(|| tracing::info!("HTTP server started on {}", addr));

    let stop = Arc::new(Notify::new());
    let server = axum::serve(listener, app).with_graceful_shutdown({
        let stop = stop.clone();
        async move { stop.notified().await }
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        res = &mut server => {
            res.context("HTTP server task panicked")?.context("HTTP server failed")?;
            return Ok(());
        }
        _ = shutdown::shutdown_signal(logger.clone()) => {}
    }

    logger.in_scope(|| tracing::info!("shutting down HTTP server"));
    stop.notify_one();

    match tokio::time::timeout(config.shutdown_timeout, server).await {
        Ok(res) => {
            res.context("HTTP server task panicked")?.context("HTTP server failed")?;
            logger.in_scope(|| tracing::info!("HTTP server stopped gracefully"));
        }
        Err(_) => {
            logger.in_scope(|| {
                tracing::warn!(
                    timeout_secs = config.shutdown_timeout.as_secs(),
                    "HTTP server forced to shut down"
                )
            });
        }
    }

    Ok(())
}
