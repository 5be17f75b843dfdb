use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use walletd_core::WalletId;

use crate::app::dto::{ChangeBalanceBody, WalletBalanceResponse};
use crate::app::errors;
use crate::app::AppState;

pub async fn change_wallet_balance(
    Extension(state): Extension<AppState>,
    body: Result<Json<ChangeBalanceBody>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            let detail = rejection.body_text();
            state
                .logger
                .in_scope(|| tracing::warn!(detail = %detail, "invalid request body"));
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("Invalid request body: {detail}"),
            );
        }
    };

    match state.service.change_balance(body.into()).await {
        Ok(wallet) => {
            (StatusCode::OK, Json(WalletBalanceResponse::from(wallet))).into_response()
        }
        Err(e) => errors::wallet_error_to_response(&e),
    }
}

pub async fn get_wallet_balance(
    Extension(state): Extension<AppState>,
    Path(wallet_uuid): Path<String>,
) -> axum::response::Response {
    let wallet_id: WalletId = match wallet_uuid.parse() {
        Ok(id) => id,
        Err(e) => {
            state
                .logger
                .in_scope(|| tracing::warn!(wallet_uuid = %wallet_uuid, "malformed wallet id"));
            return errors::wallet_error_to_response(&e);
        }
    };

    match state.service.get_balance(wallet_id).await {
        Ok(wallet) => {
            (StatusCode::OK, Json(WalletBalanceResponse::from(wallet))).into_response()
        }
        Err(e) => errors::wallet_error_to_response(&e),
    }
}
