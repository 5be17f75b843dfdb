//! Wallet error model.

use thiserror::Error;

use crate::id::WalletId;

/// Result type used across the wallet layers.
pub type WalletResult<T> = Result<T, WalletError>;

/// Wallet-level error.
///
/// Every layer above the store speaks this vocabulary. Client-input failures
/// are distinguished from backend faults via [`WalletError::is_client_error`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Operation kind was not one of `DEPOSIT` / `WITHDRAW`.
    #[error("invalid operation type: {0}. Expected DEPOSIT or WITHDRAW")]
    InvalidOperation(String),

    /// A value failed validation (e.g. non-positive amount).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The identifier does not resolve to an existing wallet.
    #[error("wallet with id {0} not found")]
    NotFound(WalletId),

    /// A withdrawal would drive the balance negative.
    #[error("insufficient balance for withdrawal from wallet {0}")]
    InsufficientFunds(WalletId),

    /// The backend failed. `detail` is for logs only and is not part of `Display`.
    #[error("backend failure during {operation} for wallet {wallet_id}")]
    Backend {
        operation: &'static str,
        wallet_id: WalletId,
        detail: String,
    },
}

impl WalletError {
    pub fn invalid_operation(kind: impl Into<String>) -> Self {
        Self::InvalidOperation(kind.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn backend(operation: &'static str, wallet_id: WalletId, detail: impl ToString) -> Self {
        Self::Backend {
            operation,
            wallet_id,
            detail: detail.to_string(),
        }
    }

    /// `true` for failures caused by the caller's input rather than a server fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Backend { .. })
    }
}
