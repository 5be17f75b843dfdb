//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the `WalletService` facade and store wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use walletd_observability::Logger;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::WalletService;

/// Per-request handles shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn WalletService>,
    pub logger: Logger,
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(service: Arc<dyn WalletService>, logger: Logger) -> Router {
    let state = AppState { service, logger };

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(state))
}
