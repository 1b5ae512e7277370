//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::User;
use crate::domain::value_object::{TokenDigest, UserName};
use crate::error::AccountResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A taken name fails with `UsernameTaken`, including
    /// when the conflict is only detected at insert time.
    async fn create(&self, user: &User) -> AccountResult<()>;

    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountResult<bool>;

    async fn find_by_user_name(&self, user_name: &UserName) -> AccountResult<Option<User>>;

    /// Indexed lookup of the user whose current token has this digest
    async fn find_by_token_digest(&self, digest: &TokenDigest) -> AccountResult<Option<User>>;

    /// Replace the stored token digest (and bump the heartbeat)
    async fn update_token_digest(
        &self,
        user_name: &UserName,
        digest: &TokenDigest,
    ) -> AccountResult<()>;
}
