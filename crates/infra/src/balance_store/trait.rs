use std::sync::Arc;

use thiserror::Error;

use walletd_core::WalletId;

/// Balance store operation error.
///
/// These are **infrastructure errors** (I/O, connectivity, malformed rows) as
/// opposed to wallet outcomes like "not found" or "insufficient funds", which
/// the store reports through its return values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BalanceStoreError {
    /// The pool or connection is unavailable (closed, timed out, I/O, TLS).
    #[error("connection failure: {0}")]
    Connection(String),

    /// The backend rejected or failed the statement.
    #[error("query failed: {0}")]
    Query(String),

    /// A row came back in an unexpected shape.
    #[error("malformed row: {0}")]
    Decode(String),

    /// The resulting balance does not fit the balance column.
    #[error("balance out of range: {0}")]
    OutOfRange(String),
}

/// Keyed integer balance per wallet with atomic conditional adjustment.
///
/// ## Contract
///
/// - `exists`: `true` iff a wallet row exists.
/// - `adjust_balance`: applies `balance += delta` in **one** backend-evaluated
///   step guarded by `balance + delta >= 0`. Returns `Some(new_balance)` when
///   exactly one row matched, `None` when nothing matched the
///   identifier-and-precondition combination.
/// - `read_balance`: point-in-time read, `None` when the wallet is absent.
///
/// Implementations must never read-then-write from application code; two
/// concurrent debits that jointly overdraw must be serialized by the backend
/// so at most one succeeds.
#[async_trait::async_trait]
pub trait BalanceStore: Send + Sync {
    async fn exists(&self, wallet_id: WalletId) -> Result<bool, BalanceStoreError>;

    async fn adjust_balance(
        &self,
        wallet_id: WalletId,
        delta: i64,
    ) -> Result<Option<i64>, BalanceStoreError>;

    async fn read_balance(&self, wallet_id: WalletId) -> Result<Option<i64>, BalanceStoreError>;
}

#[async_trait::async_trait]
impl<S> BalanceStore for Arc<S>
where
    S: BalanceStore + ?Sized,
{
    async fn exists(&self, wallet_id: WalletId) -> Result<bool, BalanceStoreError> {
        (**self).exists(wallet_id).await
    }

    async fn adjust_balance(
        &self,
        wallet_id: WalletId,
        delta: i64,
    ) -> Result<Option<i64>, BalanceStoreError> {
        (**self).adjust_balance(wallet_id, delta).await
    }

    async fn read_balance(&self, wallet_id: WalletId) -> Result<Option<i64>, BalanceStoreError> {
        (**self).read_balance(wallet_id).await
    }
}
