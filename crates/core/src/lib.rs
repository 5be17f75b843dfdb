//! `walletd-core`: wallet domain primitives.
//!
//! This crate contains **pure domain** types (no infrastructure concerns):
//! identifiers, validated operation requests and the error vocabulary shared by
//! every layer above it.

pub mod error;
pub mod id;
pub mod wallet;

pub use error::{WalletError, WalletResult};
pub use id::WalletId;
pub use wallet::{Amount, ChangeBalanceRequest, OperationKind, OperationRequest, Wallet};
