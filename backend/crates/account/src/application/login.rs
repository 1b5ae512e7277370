//! Login Use Case
//!
//! Verifies credentials and issues a new bearer token.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RawPassword, SessionToken, UserName};
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Plaintext token, returned exactly once
    pub token: SessionToken,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        // A name that could never have registered is just an unknown user
        let user_name =
            UserName::new(input.user_name).map_err(|_| AccountError::InvalidCredentials)?;

        let mut user = self
            .repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let raw_password = RawPassword::for_login(input.password);
        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AccountError::InvalidCredentials);
        }

        let token = SessionToken::generate();
        user.rotate_token(token.digest(&self.config.token_secret));
        self.repo
            .update_token_digest(&user.user_name, &user.token_digest)
            .await?;

        tracing::info!(user_name = %user.user_name, "User logged in");

        Ok(LoginOutput { token })
    }
}
