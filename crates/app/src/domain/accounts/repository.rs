//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::accounts::{
    data::NewAccount,
    records::{AccountRecord, AccountUuid},
};

const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");

/// PostgreSQL-backed accounts repository.
#[derive(Debug, Clone)]
pub(crate) struct PgAccountsRepository {
    pool: PgPool,
}

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(CREATE_ACCOUNT_SQL)
            .bind(account.uuid.into_uuid())
            .bind(account.email)
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AccountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AccountUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
