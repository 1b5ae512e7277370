//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::Serialize;

use crate::domain::value_object::{TokenDigest, UserName, UserPassword};

/// Coins granted on registration
pub const INITIAL_COINS: i64 = 3;

/// Secondary currency granted on registration
pub const INITIAL_TOKENS: i64 = 0;

/// User entity
///
/// Created on registration, never deleted. The token digest is replaced on every
/// login; the coin balance is mutated only by the pull settlement.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub password_hash: UserPassword,
    /// Digest of the single active bearer token
    pub token_digest: TokenDigest,
    /// Never negative
    pub coins: i64,
    pub tokens: i64,
    pub created_at: DateTime<Utc>,
    pub last_heartbeat_at: DateTime<Utc>,
    pub active_since: DateTime<Utc>,
}

impl User {
    /// Create a new user with the starting balance
    pub fn new(user_name: UserName, password_hash: UserPassword, token_digest: TokenDigest) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            password_hash,
            token_digest,
            coins: INITIAL_COINS,
            tokens: INITIAL_TOKENS,
            created_at: now,
            last_heartbeat_at: now,
            active_since: now,
        }
    }

    /// Swap in a freshly issued token, invalidating the previous one
    pub fn rotate_token(&mut self, token_digest: TokenDigest) {
        self.token_digest = token_digest;
        self.last_heartbeat_at = Utc::now();
    }

    pub fn balance(&self) -> Balance {
        Balance {
            coins: self.coins,
            tokens: self.tokens,
        }
    }
}

/// Currency snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub coins: i64,
    pub tokens: i64,
}
