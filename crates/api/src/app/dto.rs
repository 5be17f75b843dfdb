use serde::{Deserialize, Serialize};
use uuid::Uuid;

use walletd_core::{ChangeBalanceRequest, Wallet, WalletId};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeBalanceBody {
    pub wallet_id: Uuid,
    pub operation_type: String,
    pub amount: i64,
}

impl From<ChangeBalanceBody> for ChangeBalanceRequest {
    fn from(body: ChangeBalanceBody) -> Self {
        ChangeBalanceRequest {
            wallet_id: WalletId::from_uuid(body.wallet_id),
            operation_type: body.operation_type,
            amount: body.amount,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct WalletBalanceResponse {
    pub wallet_id: String,
    pub balance: i64,
}

impl From<Wallet> for WalletBalanceResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            wallet_id: wallet.id.to_string(),
            balance: wallet.balance,
        }
    }
}
