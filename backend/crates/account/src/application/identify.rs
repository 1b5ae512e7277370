//! Identify Use Case
//!
//! Resolves a bearer token to its user.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::{Balance, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{SessionToken, UserName};
use crate::error::{AccountError, AccountResult};

/// Identify use case
pub struct IdentifyUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> IdentifyUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    /// Username owning `token`, or `None` for an unknown or superseded token
    pub async fn identify(&self, token: &str) -> AccountResult<Option<UserName>> {
        Ok(self.find_user(token).await?.map(|user| user.user_name))
    }

    /// Like [`Self::identify`], but an unknown token is an `InvalidToken` error
    pub async fn authenticate(&self, token: &str) -> AccountResult<UserName> {
        self.identify(token)
            .await?
            .ok_or(AccountError::InvalidToken)
    }

    /// Current coin and token balance of the token's owner
    pub async fn balance(&self, token: &str) -> AccountResult<Balance> {
        self.find_user(token)
            .await?
            .map(|user| user.balance())
            .ok_or(AccountError::InvalidToken)
    }

    async fn find_user(&self, token: &str) -> AccountResult<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }
        let digest = SessionToken::from_client(token).digest(&self.config.token_secret);
        self.repo.find_by_token_digest(&digest).await
    }
}
