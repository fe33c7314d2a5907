//! Accounts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::accounts::{
    data::NewAccount, errors::AccountsServiceError, records::AccountRecord,
    repository::PgAccountsRepository,
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAccountsRepository::new(pool),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<AccountRecord, AccountsServiceError> {
        self.repository
            .create_account(account)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Account persistence operations.
pub trait AccountsService: Send + Sync {
    /// Creates a new account.
    async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<AccountRecord, AccountsServiceError>;
}
