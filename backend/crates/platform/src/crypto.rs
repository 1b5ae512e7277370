//! Cryptographic Utilities

use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

/// Length in bytes of an opaque bearer token before hex encoding
pub const TOKEN_BYTES: usize = 32;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate an opaque token: [`TOKEN_BYTES`] random bytes, lowercase hex
pub fn random_token() -> String {
    hex::encode(random_bytes(TOKEN_BYTES))
}

/// Compute HMAC-SHA256
///
/// Deterministic for a given key, so the output can be used as an indexed lookup key
/// while the input stays unrecoverable without the key.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_rfc4231_case_2() {
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        let expected =
            hex::decode("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
                .unwrap();
        assert_eq!(mac.to_vec(), expected);
    }

    #[test]
    fn test_hmac_depends_on_key() {
        let data = b"token";
        assert_eq!(hmac_sha256(&[1u8; 32], data), hmac_sha256(&[1u8; 32], data));
        assert_ne!(hmac_sha256(&[1u8; 32], data), hmac_sha256(&[2u8; 32], data));
    }

    #[test]
    fn test_random_token_shape() {
        let token = random_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, random_token());
    }
}
