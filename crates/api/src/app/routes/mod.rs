use axum::{
    routing::{get, post},
    Router,
};

pub mod system;
pub mod wallets;

pub const WALLET_BY_UUID: &str = "/api/v1/wallets/:wallet_uuid";
pub const WALLET_CHANGE_BALANCE: &str = "/api/v1/wallet";

/// Router for the wallet endpoints.
pub fn router() -> Router {
    Router::new()
        .route(WALLET_BY_UUID, get(wallets::get_wallet_balance))
        .route(WALLET_CHANGE_BALANCE, post(wallets::change_wallet_balance))
}
