//! API DTOs (Data Transfer Objects)
//!
//! Missing string fields deserialize as empty and then fail validation.

use serde::{Deserialize, Serialize};

// ============================================================================
// Register / Login
// ============================================================================

/// Register and login request
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Generic acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub detail: &'static str,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Token-only requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhoAmIResponse {
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub coins: i64,
    pub tokens: i64,
}
