//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository traits
//! - `application/` - Use cases (register, login, identify) and configuration
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with username + password (switchable)
//! - Login issuing a single active opaque bearer token
//! - Token resolution (`whoami`) and balance lookup
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Tokens stored only as `HMAC-SHA256(token_secret, token)`, looked up by unique index
//! - Unknown user and wrong password are indistinguishable

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::{account_router, account_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
