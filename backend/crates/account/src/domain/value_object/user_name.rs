//! User Name Value Object
//!
//! The username is the login handle and the owner key of every inventory entry.
//!
//! ## Invariants
//! - Length: 3 to 16 characters
//! - Characters: ASCII letters, digits and `_` only
//! - Case is preserved and significant (`Alice` and `alice` are different users)

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 16;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    TooShort { length: usize, min: usize },
    TooLong { length: usize, max: usize },
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { length, min } => {
                write!(f, "User name is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only A-Z, a-z, 0-9 and _ are allowed"
                )
            }
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate raw input. No trimming or case folding is applied.
    pub fn new(input: impl Into<String>) -> Result<Self, UserNameError> {
        let value = input.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(value: &str) -> Result<(), UserNameError> {
        let length = value.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        for (pos, ch) in value.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(UserNameError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserName {
    type Error = UserNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod length_validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert!(matches!(
                UserName::new(""),
                Err(UserNameError::TooShort { length: 0, min: 3 })
            ));
        }

        #[test]
        fn test_too_short() {
            assert!(matches!(
                UserName::new("ab"),
                Err(UserNameError::TooShort { length: 2, min: 3 })
            ));
        }

        #[test]
        fn test_minimum_length() {
            assert_eq!(UserName::new("abc").unwrap().as_str(), "abc");
        }

        #[test]
        fn test_maximum_length() {
            let input = "a".repeat(USER_NAME_MAX_LENGTH);
            assert!(UserName::new(input).is_ok());
        }

        #[test]
        fn test_too_long() {
            let input = "a".repeat(USER_NAME_MAX_LENGTH + 1);
            assert!(matches!(
                UserName::new(input),
                Err(UserNameError::TooLong { length: 17, max: 16 })
            ));
        }
    }

    mod character_validation {
        use super::*;

        #[test]
        fn test_valid_mixed() {
            assert!(UserName::new("Alice_123").is_ok());
        }

        #[test]
        fn test_leading_underscore_ok() {
            assert!(UserName::new("_alice").is_ok());
        }

        #[test]
        fn test_bang_fails() {
            // "!" is also too short; pad it to hit the charset rule
            assert!(UserName::new("!").is_err());
            assert!(matches!(
                UserName::new("alice!"),
                Err(UserNameError::InvalidCharacter { char: '!', position: 5 })
            ));
        }

        #[test]
        fn test_dot_and_hyphen_fail() {
            assert!(UserName::new("alice.bob").is_err());
            assert!(UserName::new("alice-bob").is_err());
        }

        #[test]
        fn test_whitespace_fails() {
            assert!(UserName::new(" alice").is_err());
            assert!(UserName::new("ali ce").is_err());
        }

        #[test]
        fn test_non_ascii_fails() {
            assert!(matches!(
                UserName::new("ａｌｉｃｅ"),
                Err(UserNameError::InvalidCharacter { .. })
            ));
        }
    }

    mod case_handling {
        use super::*;

        #[test]
        fn test_case_preserved() {
            assert_eq!(UserName::new("Alice").unwrap().as_str(), "Alice");
        }

        #[test]
        fn test_case_significant() {
            assert_ne!(UserName::new("Alice").unwrap(), UserName::new("alice").unwrap());
        }
    }

    mod serde_roundtrip {
        use super::*;

        #[test]
        fn test_deserialize_validates() {
            let ok: Result<UserName, _> = serde_json::from_str("\"alice\"");
            assert!(ok.is_ok());
            let bad: Result<UserName, _> = serde_json::from_str("\"a\"");
            assert!(bad.is_err());
        }
    }
}
