use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use walletd_api::app::{self, services::WalletService};
use walletd_core::{ChangeBalanceRequest, Wallet, WalletError, WalletId, WalletResult};
use walletd_infra::InMemoryBalanceStore;
use walletd_observability::Logger;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(service: Arc<dyn WalletService>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = app::build_app(service, Logger::disabled());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn with_wallets(wallets: &[(WalletId, i64)]) -> Self {
        let store = InMemoryBalanceStore::with_wallets(wallets.iter().copied()).unwrap();
        Self::spawn(app::services::services_for_store(store, Logger::disabled())).await
    }

    async fn change(&self, client: &reqwest::Client, id: WalletId, kind: &str, amount: i64) -> reqwest::Response {
        client
            .post(format!("{}/api/v1/wallet", self.base_url))
            .json(&json!({
                "walletId": id.to_string(),
                "operationType": kind,
                "amount": amount,
            }))
            .send()
            .await
            .unwrap()
    }

    async fn balance(&self, client: &reqwest::Client, id: &str) -> reqwest::Response {
        client
            .get(format!("{}/api/v1/wallets/{}", self.base_url, id))
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Facade that always fails with a backend error carrying internal detail.
struct BrokenBackend;

#[async_trait::async_trait]
impl WalletService for BrokenBackend {
    async fn change_balance(&self, request: ChangeBalanceRequest) -> WalletResult<Wallet> {
        Err(WalletError::backend(
            "deposit",
            request.wallet_id,
            "database error: relation \"wallets\" does not exist",
        ))
    }

    async fn get_balance(&self, wallet_id: WalletId) -> WalletResult<Wallet> {
        Err(WalletError::backend("read balance", wallet_id, "connection refused"))
    }
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::with_wallets(&[]).await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn deposit_withdraw_overdraw_lifecycle() {
    let id = WalletId::new();
    let srv = TestServer::with_wallets(&[(id, 0)]).await;
    let client = reqwest::Client::new();

    // Deposit 100 into an empty wallet.
    let res = srv.change(&client, id, "DEPOSIT", 100).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["wallet_id"].as_str().unwrap(), id.to_string());
    assert_eq!(body["balance"], 100);

    // Withdraw 30.
    let res = srv.change(&client, id, "withdraw", 30).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 70);

    // Overdraw is rejected.
    let res = srv.change(&client, id, "WITHDRAW", 150).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_funds");

    // Balance unchanged, and reading twice agrees.
    for _ in 0..2 {
        let res = srv.balance(&client, &id.to_string()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["balance"], 70);
    }
}

#[tokio::test]
async fn nil_wallet_is_not_found() {
    let srv = TestServer::with_wallets(&[]).await;
    let client = reqwest::Client::new();
    let nil = WalletId::nil();

    for kind in ["DEPOSIT", "WITHDRAW"] {
        let res = srv.change(&client, nil, kind, 10).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    let res = srv.balance(&client, "00000000-0000-0000-0000-000000000000").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn unknown_operation_type_is_rejected_without_mutation() {
    let id = WalletId::new();
    let srv = TestServer::with_wallets(&[(id, 50)]).await;
    let client = reqwest::Client::new();

    let res = srv.change(&client, id, "transfer", 10).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_operation");

    let body: serde_json::Value = srv.balance(&client, &id.to_string()).await.json().await.unwrap();
    assert_eq!(body["balance"], 50);
}

#[tokio::test]
async fn non_positive_amount_is_a_validation_error() {
    let id = WalletId::new();
    let srv = TestServer::with_wallets(&[(id, 50)]).await;
    let client = reqwest::Client::new();

    let res = srv.change(&client, id, "DEPOSIT", 0).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let srv = TestServer::with_wallets(&[]).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/v1/wallet", srv.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn concurrent_withdrawals_over_http_never_overdraw() {
    let id = WalletId::new();
    let srv = TestServer::with_wallets(&[(id, 100)]).await;
    let client = reqwest::Client::new();

    let (a, b) = tokio::join!(
        srv.change(&client, id, "WITHDRAW", 60),
        srv.change(&client, id, "WITHDRAW", 60),
    );
    let mut statuses = [a.status(), b.status()];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, [StatusCode::OK, StatusCode::BAD_REQUEST]);

    let body: serde_json::Value = srv.balance(&client, &id.to_string()).await.json().await.unwrap();
    assert_eq!(body["balance"], 40);
}

#[tokio::test]
async fn backend_failures_do_not_leak_detail() {
    let srv = TestServer::spawn(Arc::new(BrokenBackend)).await;
    let client = reqwest::Client::new();
    let id = WalletId::new();

    let res = srv.change(&client, id, "DEPOSIT", 1).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "backend_error");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("deposit"));
    assert!(!message.contains("relation"));

    let res = srv.balance(&client, &id.to_string()).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(!body["message"].as_str().unwrap().contains("connection refused"));
}
