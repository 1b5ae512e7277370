//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RawPassword, SessionToken, UserName, UserPassword};
use crate::error::{AccountError, AccountResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<()> {
        if !self.config.registrations_enabled {
            return Err(AccountError::RegistrationsDisabled);
        }

        let user_name = UserName::new(input.user_name)
            .map_err(|e| AccountError::InvalidUsername(e.to_string()))?;
        let raw_password = RawPassword::new(input.password)?;

        if self.repo.exists_by_user_name(&user_name).await? {
            return Err(AccountError::UsernameTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        // Every user has a token slot from creation; this one is never handed out
        let initial_digest = SessionToken::generate().digest(&self.config.token_secret);

        let user = User::new(user_name, password_hash, initial_digest);
        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(())
    }
}
