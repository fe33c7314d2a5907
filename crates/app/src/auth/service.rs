//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, IssuedApiToken, NewApiToken, generate_api_token, hash_api_token,
        repository::PgAuthRepository,
    },
    domain::accounts::records::AccountUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_api_token(
        &self,
        account: AccountUuid,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token = generate_api_token();

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: Uuid::now_v7(),
                account_uuid: account,
                token_hash: hash_api_token(&token),
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AccountUuid, AuthServiceError> {
        self.repository
            .find_account_by_token_hash(&hash_api_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the account a bearer token belongs to.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AccountUuid, AuthServiceError>;
}
