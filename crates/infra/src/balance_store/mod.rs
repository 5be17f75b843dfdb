//! Balance store boundary.
//!
//! Durable, concurrency-safe storage of one integer balance per wallet. All
//! mutation goes through a single conditional adjust so the backend, not the
//! application, decides whether a debit may proceed.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryBalanceStore;
pub use postgres::PostgresBalanceStore;
pub use r#trait::{BalanceStore, BalanceStoreError};
