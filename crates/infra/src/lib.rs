//! Infrastructure layer: balance storage, the wallet operation engine,
//! configuration and connection-pool wiring.

pub mod balance_store;
pub mod config;
pub mod db;
pub mod engine;


pub use balance_store::{BalanceStore, BalanceStoreError, InMemoryBalanceStore, PostgresBalanceStore};
pub use config::{Config, ConfigError, DatabaseConfig};
pub use engine::WalletEngine;
