//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Cryptographic utilities (random tokens, HMAC-SHA256)
//! - Password hashing (Argon2id)

pub mod crypto;
pub mod password;
