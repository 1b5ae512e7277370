//! Session Token Value Objects
//!
//! A [`SessionToken`] is the plaintext bearer credential handed to the client once.
//! Only its [`TokenDigest`] (`HMAC-SHA256(token_secret, token)`) is persisted, which keeps
//! lookup a single indexed equality match.

use std::fmt;

use platform::crypto::{hmac_sha256, random_token};

/// Plaintext bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Fresh token: 32 bytes from the OS CSPRNG, lowercase hex.
    pub fn generate() -> Self {
        Self(random_token())
    }

    /// Wrap a token received from a client
    pub fn from_client(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn digest(&self, secret: &[u8; 32]) -> TokenDigest {
        TokenDigest(hmac_sha256(secret, self.0.as_bytes()))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

/// Stored form of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenDigest([u8; 32]);

impl TokenDigest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create from database values. `None` when the column is not 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(bytes).ok().map(Self)
    }
}
