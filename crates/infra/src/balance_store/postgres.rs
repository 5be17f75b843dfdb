//! Postgres-backed balance store implementation.
//!
//! The non-negative balance invariant is enforced by the database: the adjust
//! statement carries its own precondition and the table carries a CHECK
//! constraint. Nothing here reads a balance in order to decide a write.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `BalanceStoreError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | BalanceStoreError |
//! |------------|----------------------|-------------------|
//! | Database (numeric out of range) | `22003` | `OutOfRange` |
//! | Database (check violation) | `23514` | `OutOfRange` |
//! | Database (other) | Any other | `Query` |
//! | PoolClosed / PoolTimedOut / Io / Tls | N/A | `Connection` |
//! | ColumnDecode / Decode / ColumnNotFound / TypeNotFound | N/A | `Decode` |
//! | Other | N/A | `Query` |
//!
//! Messages carry the operation name and the database's own message, never the
//! statement text.

use std::sync::Arc;

use sqlx::{PgPool, Row};

use walletd_core::WalletId;
use walletd_observability::Logger;

use super::r#trait::{BalanceStore, BalanceStoreError};

const CREATE_WALLETS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS wallets (
        id      UUID   PRIMARY KEY,
        balance BIGINT NOT NULL DEFAULT 0 CHECK (balance >= 0)
    )
"#;

const WALLET_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM wallets WHERE id = $1) AS found";

// `balance + $1 >= 0` is `balance >= amount` for a withdrawal and always true
// for a deposit, so one statement covers both kinds.
const ADJUST_BALANCE: &str = r#"
    UPDATE wallets
    SET balance = balance + $1
    WHERE id = $2 AND balance + $1 >= 0
    RETURNING balance
"#;

const READ_BALANCE: &str = "SELECT balance FROM wallets WHERE id = $1";

const UPSERT_WALLET: &str = r#"
    INSERT INTO wallets (id, balance)
    VALUES ($1, $2)
    ON CONFLICT (id) DO UPDATE SET balance = EXCLUDED.balance
"#;

/// Postgres-backed balance store.
///
/// ## Thread Safety
///
/// Uses the SQLx connection pool, which is `Send + Sync`. Every call acquires a
/// connection for exactly one statement and releases it on completion.
#[derive(Debug, Clone)]
pub struct PostgresBalanceStore {
    pool: Arc<PgPool>,
    logger: Logger,
}

impl PostgresBalanceStore {
    pub fn new(pool: PgPool, logger: Logger) -> Self {
        Self {
            pool: Arc::new(pool),
            logger,
        }
    }

    /// Create the `wallets` table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), BalanceStoreError> {
        sqlx::query(CREATE_WALLETS_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        self.logger.in_scope(|| tracing::info!("wallets schema ready"));
        Ok(())
    }

    /// Provision (or overwrite) a wallet row. Seeding and tests only.
    pub async fn insert_wallet(&self, wallet_id: WalletId, balance: i64) -> Result<(), BalanceStoreError> {
        sqlx::query(UPSERT_WALLET)
            .bind(wallet_id.as_uuid())
            .bind(balance)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_wallet", e))?;
        Ok(())
    }

    fn trace(&self, operation: &'static str, wallet_id: WalletId) {
        self.logger.in_scope(|| {
            tracing::debug!(operation, wallet_id = %wallet_id, "executing statement");
        });
    }
}

#[async_trait::async_trait]
impl BalanceStore for PostgresBalanceStore {
    async fn exists(&self, wallet_id: WalletId) -> Result<bool, BalanceStoreError> {
        self.trace("exists", wallet_id);

        let row = sqlx::query(WALLET_EXISTS)
            .bind(wallet_id.as_uuid())
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("exists", e))?;

        row.try_get::<bool, _>("found")
            .map_err(|e| map_sqlx_error("exists", e))
    }

    async fn adjust_balance(
        &self,
        wallet_id: WalletId,
        delta: i64,
    ) -> Result<Option<i64>, BalanceStoreError> {
        self.trace("adjust_balance", wallet_id);

        let row = sqlx::query(ADJUST_BALANCE)
            .bind(delta)
            .bind(wallet_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("adjust_balance", e))?;

        row.map(|r| r.try_get::<i64, _>("balance"))
            .transpose()
            .map_err(|e| map_sqlx_error("adjust_balance", e))
    }

    async fn read_balance(&self, wallet_id: WalletId) -> Result<Option<i64>, BalanceStoreError> {
        self.trace("read_balance", wallet_id);

        let row = sqlx::query(READ_BALANCE)
            .bind(wallet_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("read_balance", e))?;

        row.map(|r| r.try_get::<i64, _>("balance"))
            .transpose()
            .map_err(|e| map_sqlx_error("read_balance", e))
    }
}

/// Map SQLx errors to BalanceStoreError.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> BalanceStoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                // numeric_value_out_of_range
                Some("22003") => BalanceStoreError::OutOfRange(msg),
                // check_violation
                Some("23514") => BalanceStoreError::OutOfRange(msg),
                _ => BalanceStoreError::Query(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            BalanceStoreError::Connection(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            BalanceStoreError::Connection(format!("timed out acquiring connection in {}", operation))
        }
        sqlx::Error::Io(e) => BalanceStoreError::Connection(format!("i/o error in {}: {}", operation, e)),
        sqlx::Error::Tls(e) => BalanceStoreError::Connection(format!("tls error in {}: {}", operation, e)),
        sqlx::Error::ColumnDecode { index, source } => BalanceStoreError::Decode(format!(
            "failed to decode column {} in {}: {}",
            index, operation, source
        )),
        sqlx::Error::Decode(e) => BalanceStoreError::Decode(format!("decode error in {}: {}", operation, e)),
        sqlx::Error::ColumnNotFound(col) => {
            BalanceStoreError::Decode(format!("column '{}' missing in {}", col, operation))
        }
        sqlx::Error::TypeNotFound { type_name } => {
            BalanceStoreError::Decode(format!("type '{}' unknown in {}", type_name, operation))
        }
        other => BalanceStoreError::Query(format!("sqlx error in {}: {}", operation, other)),
    }
}
