//! Connection-pool construction.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use walletd_observability::Logger;

use crate::balance_store::BalanceStoreError;
use crate::balance_store::postgres::map_sqlx_error;
use crate::config::DatabaseConfig;

/// Build a bounded pool and verify the database answers.
pub async fn connect(config: &DatabaseConfig, logger: &Logger) -> Result<PgPool, BalanceStoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))?;

    if let Err(e) = sqlx::query("SELECT 1").execute(&pool).await {
        pool.close().await;
        return Err(map_sqlx_error("ping", e));
    }

    logger.in_scope(|| {
        tracing::info!(
            max_connections = config.max_connections,
            "connected to PostgreSQL"
        )
    });

    Ok(pool)
}
