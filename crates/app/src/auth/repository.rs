//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::models::{ApiTokenMetadata, NewApiToken},
    domain::accounts::records::AccountUuid,
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_ACCOUNT_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_account_by_token_hash.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a hashed API token.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_api_token(
        &self,
        token: &NewApiToken,
    ) -> Result<ApiTokenMetadata, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.account_uuid.into_uuid())
            .bind(&token.token_hash)
            .fetch_one(&self.pool)
            .await
    }

    /// Resolve the account owning an active token hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_account_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<AccountUuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(FIND_ACCOUNT_BY_TOKEN_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
            .map(|uuid| uuid.map(AccountUuid::from_uuid))
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            account_uuid: row.try_get::<Uuid, _>("account_uuid")?.into(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
