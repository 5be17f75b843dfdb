use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use walletd_core::WalletError;

/// Map a wallet error to an HTTP response.
///
/// Backend failures are 500s whose message names only the failed operation;
/// the store detail stays in the logs.
pub fn wallet_error_to_response(err: &WalletError) -> axum::response::Response {
    let (status, code) = match err {
        WalletError::InvalidOperation(_) => (StatusCode::BAD_REQUEST, "invalid_operation"),
        WalletError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        WalletError::InvalidId(_) => (StatusCode::BAD_REQUEST, "invalid_id"),
        WalletError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        WalletError::InsufficientFunds(_) => (StatusCode::BAD_REQUEST, "insufficient_funds"),
        WalletError::Backend { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "backend_error"),
    };
    json_error(status, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
