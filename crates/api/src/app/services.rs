//! Service facade and infrastructure wiring.
//!
//! Handlers only see `Arc<dyn WalletService>`; which store sits behind it is
//! decided here.

use std::sync::Arc;

use walletd_core::{ChangeBalanceRequest, Wallet, WalletId, WalletResult};
use walletd_infra::{db, BalanceStore, Config, PostgresBalanceStore, WalletEngine};
use walletd_observability::Logger;

/// Operations exposed to the HTTP layer.
#[async_trait::async_trait]
pub trait WalletService: Send + Sync {
    async fn change_balance(&self, request: ChangeBalanceRequest) -> WalletResult<Wallet>;

    async fn get_balance(&self, wallet_id: WalletId) -> WalletResult<Wallet>;
}

/// Pass-through to the engine. Errors are returned unchanged.
pub struct DefaultWalletService<S> {
    engine: WalletEngine<S>,
}

impl<S> DefaultWalletService<S>
where
    S: BalanceStore,
{
    pub fn new(engine: WalletEngine<S>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl<S> WalletService for DefaultWalletService<S>
where
    S: BalanceStore + 'static,
{
    async fn change_balance(&self, request: ChangeBalanceRequest) -> WalletResult<Wallet> {
        self.engine.change_balance(request).await
    }

    async fn get_balance(&self, wallet_id: WalletId) -> WalletResult<Wallet> {
        self.engine.get_balance(wallet_id).await
    }
}

/// Wrap any store in engine + facade.
pub fn services_for_store<S>(store: S, logger: Logger) -> Arc<dyn WalletService>
where
    S: BalanceStore + 'static,
{
    Arc::new(DefaultWalletService::new(WalletEngine::new(store, logger)))
}

/// Production wiring: Postgres pool → store (schema ensured) → engine → facade.
pub async fn build_services(config: &Config, logger: &Logger) -> anyhow::Result<Arc<dyn WalletService>> {
    let pool = db::connect(&config.database, logger).await?;
    let store = PostgresBalanceStore::new(pool, logger.clone());
    store.ensure_schema().await?;
    Ok(services_for_store(store, logger.clone()))
}
