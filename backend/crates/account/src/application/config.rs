//! Application Configuration

use std::fmt;

/// Account application configuration
#[derive(Clone)]
pub struct AccountConfig {
    /// Registration switch (`403` when off)
    pub registrations_enabled: bool,
    /// HMAC key for token digests (32 bytes)
    pub token_secret: [u8; 32],
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            registrations_enabled: true,
            token_secret: [0u8; 32],
            password_pepper: None,
        }
    }
}

impl AccountConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development. Tokens do not survive a restart.
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("registrations_enabled", &self.registrations_enabled)
            .field("token_secret", &"[REDACTED]")
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secrets_differ() {
        let a = AccountConfig::with_random_secret();
        let b = AccountConfig::with_random_secret();
        assert_ne!(a.token_secret, b.token_secret);
        assert!(a.registrations_enabled);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AccountConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AccountConfig::development()
        };
        let debug = format!("{:?}", config);
        assert_eq!(debug.matches("[REDACTED]").count(), 2);
    }
}
