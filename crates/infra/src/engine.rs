//! Wallet operation engine.
//!
//! Turns a balance-change request into a single atomic store adjustment and
//! explains, in wallet terms, why an adjustment did not happen.
//!
//! ```text
//! ChangeBalanceRequest
//!   ↓
//! 1. Validate (operation kind, then amount)      → InvalidOperation / Validation
//!   ↓
//! 2. BalanceStore::exists                        → NotFound
//!   ↓
//! 3. BalanceStore::adjust_balance(id, ±amount)
//!   ↓
//! 4. no match: deposit → NotFound, withdraw → InsufficientFunds
//! ```
//!
//! Steps 2 and 3 are separate backend calls. A wallet removed between them
//! surfaces as `NotFound` for deposits and `InsufficientFunds` for withdrawals;
//! wallets are never deleted by this service, so that window is accepted.
//!
//! No locks are taken and nothing is retried here. Concurrent writers to the
//! same wallet are serialized by the store's conditional update.

use walletd_core::{
    ChangeBalanceRequest, OperationKind, OperationRequest, Wallet, WalletError, WalletId,
    WalletResult,
};
use walletd_observability::Logger;

use crate::balance_store::BalanceStore;

pub struct WalletEngine<S> {
    store: S,
    logger: Logger,
}

impl<S> WalletEngine<S>
where
    S: BalanceStore,
{
    pub fn new(store: S, logger: Logger) -> Self {
        Self { store, logger }
    }

    /// Apply a deposit or withdrawal and return the wallet's new balance.
    pub async fn change_balance(&self, request: ChangeBalanceRequest) -> WalletResult<Wallet> {
        let wallet_id = request.wallet_id;

        // Rejected requests never reach the store.
        let op = OperationRequest::try_from(request).inspect_err(|e| {
            self.logger.in_scope(|| {
                tracing::warn!(wallet_id = %wallet_id, error = %e, "rejected balance change")
            })
        })?;

        let exists = self
            .store
            .exists(wallet_id)
            .await
            .map_err(|e| self.backend_error("check wallet existence", wallet_id, e))?;
        if !exists {
            return Err(self.rejected(WalletError::NotFound(wallet_id)));
        }

        let new_balance = self
            .store
            .adjust_balance(wallet_id, op.delta())
            .await
            .map_err(|e| self.backend_error(adjust_operation(op.kind), wallet_id, e))?;

        match new_balance {
            Some(balance) => {
                self.logger.in_scope(|| {
                    tracing::info!(
                        wallet_id = %wallet_id,
                        operation = op.kind.as_str(),
                        amount = op.amount.get(),
                        balance,
                        "balance changed"
                    )
                });
                Ok(Wallet {
                    id: wallet_id,
                    balance,
                })
            }
            // The existence check passed, so for a deposit an unmatched update
            // means the row vanished in between.
            None => match op.kind {
                OperationKind::Deposit => Err(self.rejected(WalletError::NotFound(wallet_id))),
                OperationKind::Withdraw => {
                    Err(self.rejected(WalletError::InsufficientFunds(wallet_id)))
                }
            },
        }
    }

    /// Point-in-time balance of an existing wallet.
    pub async fn get_balance(&self, wallet_id: WalletId) -> WalletResult<Wallet> {
        let balance = self
            .store
            .read_balance(wallet_id)
            .await
            .map_err(|e| self.backend_error("read balance", wallet_id, e))?;

        match balance {
            Some(balance) => Ok(Wallet {
                id: wallet_id,
                balance,
            }),
            None => Err(self.rejected(WalletError::NotFound(wallet_id))),
        }
    }

    fn rejected(&self, err: WalletError) -> WalletError {
        self.logger
            .in_scope(|| tracing::warn!(error = %err, "wallet operation rejected"));
        err
    }

    fn backend_error(
        &self,
        operation: &'static str,
        wallet_id: WalletId,
        source: impl std::fmt::Display,
    ) -> WalletError {
        let err = WalletError::backend(operation, wallet_id, &source);
        self.logger.in_scope(|| {
            tracing::error!(
                operation,
                wallet_id = %wallet_id,
                detail = %source,
                "balance store failure"
            )
        });
        err
    }
}

fn adjust_operation(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Deposit => "deposit",
        OperationKind::Withdraw => "withdraw",
    }
}
