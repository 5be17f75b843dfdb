use std::collections::HashMap;
use std::sync::RwLock;

use walletd_core::WalletId;

use super::r#trait::{BalanceStore, BalanceStoreError};

/// In-memory balance store.
///
/// Intended for tests/dev. The precondition check and the write happen under a
/// single write lock, which stands in for the backend's row-level atomicity.
#[derive(Debug, Default)]
pub struct InMemoryBalanceStore {
    balances: RwLock<HashMap<WalletId, i64>>,
}

impl InMemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision (or overwrite) a wallet. Provisioning is not part of the
    /// `BalanceStore` contract.
    pub fn insert_wallet(&self, wallet_id: WalletId, balance: i64) -> Result<(), BalanceStoreError> {
        if balance < 0 {
            return Err(BalanceStoreError::OutOfRange(format!(
                "initial balance {balance} is negative"
            )));
        }
        self.balances
            .write()
            .map_err(|_| poisoned())?
            .insert(wallet_id, balance);
        Ok(())
    }

    pub fn with_wallets(wallets: impl IntoIterator<Item = (WalletId, i64)>) -> Result<Self, BalanceStoreError> {
        let store = Self::new();
        for (id, balance) in wallets {
            store.insert_wallet(id, balance)?;
        }
        Ok(store)
    }
}

fn poisoned() -> BalanceStoreError {
    BalanceStoreError::Connection("lock poisoned".to_string())
}

#[async_trait::async_trait]
impl BalanceStore for InMemoryBalanceStore {
    async fn exists(&self, wallet_id: WalletId) -> Result<bool, BalanceStoreError> {
        let balances = self.balances.read().map_err(|_| poisoned())?;
        Ok(balances.contains_key(&wallet_id))
    }

    async fn adjust_balance(
        &self,
        wallet_id: WalletId,
        delta: i64,
    ) -> Result<Option<i64>, BalanceStoreError> {
        let mut balances = self.balances.write().map_err(|_| poisoned())?;

        let Some(balance) = balances.get_mut(&wallet_id) else {
            return Ok(None);
        };

        let next = balance.checked_add(delta).ok_or_else(|| {
            BalanceStoreError::OutOfRange(format!("{} + {delta} overflows", *balance))
        })?;

        if next < 0 {
            return Ok(None);
        }

        *balance = next;
        Ok(Some(next))
    }

    async fn read_balance(&self, wallet_id: WalletId) -> Result<Option<i64>, BalanceStoreError> {
        let balances = self.balances.read().map_err(|_| poisoned())?;
        Ok(balances.get(&wallet_id).copied())
    }
}
