//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, Postgres, Transaction, migrate::MigrateError, postgres::PgPoolOptions, query};
use tracing::warn;

/// SQL used to bound how long a ledger transaction waits on a row lock.
pub const SET_LOCK_TIMEOUT_SQL: &str = "SELECT set_config('lock_timeout', $1, true)";

/// Default time a ledger write waits on a contended product row.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Smallest lock wait bound Postgres honours as a finite timeout.
const MIN_LOCK_TIMEOUT: Duration = Duration::from_millis(1);

/// Default pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Shared handle to the store, handing out scoped transactions.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    lock_timeout: Duration,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Override the lock wait bound applied to ledger transactions.
    ///
    /// Postgres reads a `lock_timeout` of zero as "wait forever", so the bound
    /// is never allowed below one millisecond.
    #[must_use]
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout.max(MIN_LOCK_TIMEOUT);
        self
    }

    fn lock_timeout_setting(&self) -> String {
        format!("{}ms", self.lock_timeout.as_millis())
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction for ledger writes.
    ///
    /// The lock timeout is transaction-local, so it is released together with
    /// the row locks on commit or rollback.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or applying the lock timeout fails.
    pub async fn begin_ledger_transaction(
        &self,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_LOCK_TIMEOUT_SQL)
            .bind(self.lock_timeout_setting())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }

    /// Begin a plain read transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_read_transaction(
        &self,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Roll back a transaction without masking the failure that caused it.
pub(crate) async fn rollback(tx: Transaction<'_, Postgres>) {
    if let Err(error) = tx.rollback().await {
        warn!("failed to roll back transaction: {error}");
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply the bundled schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
