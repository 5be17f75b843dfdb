//! Wallet entity and balance-operation requests.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{WalletError, WalletResult};
use crate::id::WalletId;

/// A wallet as seen by callers: identifier plus current balance in the
/// smallest currency unit. `balance >= 0` is enforced by the store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(rename = "wallet_id")]
    pub id: WalletId,
    pub balance: i64,
}

/// Kind of balance mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Deposit,
    Withdraw,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "DEPOSIT",
            OperationKind::Withdraw => "WITHDRAW",
        }
    }
}

impl core::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = WalletError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEPOSIT" => Ok(OperationKind::Deposit),
            "WITHDRAW" => Ok(OperationKind::Withdraw),
            _ => Err(WalletError::invalid_operation(s)),
        }
    }
}

/// Strictly positive amount in the smallest currency unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub fn new(value: i64) -> WalletResult<Self> {
        if value <= 0 {
            return Err(WalletError::validation(format!(
                "amount must be greater than zero, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

/// Raw balance-change request as received from a caller. Not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeBalanceRequest {
    pub wallet_id: WalletId,
    pub operation_type: String,
    pub amount: i64,
}

/// Validated balance-change request. Constructed per call, never persisted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub wallet_id: WalletId,
    pub kind: OperationKind,
    pub amount: Amount,
}

impl OperationRequest {
    pub fn new(wallet_id: WalletId, kind: OperationKind, amount: Amount) -> Self {
        Self {
            wallet_id,
            kind,
            amount,
        }
    }

    /// Signed change to apply to the stored balance.
    pub fn delta(&self) -> i64 {
        match self.kind {
            OperationKind::Deposit => self.amount.get(),
            OperationKind::Withdraw => -self.amount.get(),
        }
    }
}

impl TryFrom<ChangeBalanceRequest> for OperationRequest {
    type Error = WalletError;

    /// The operation kind is checked first so an unknown kind is reported as
    /// `InvalidOperation` even when the amount is also bad.
    fn try_from(value: ChangeBalanceRequest) -> Result<Self, Self::Error> {
        let kind = value.operation_type.parse::<OperationKind>()?;
        let amount = Amount::new(value.amount)?;
        Ok(Self::new(value.wallet_id, kind, amount))
    }
}
