//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Unified application error.
///
/// Domain crates keep their own `thiserror` enums and convert into this type at the
/// HTTP boundary.
///
/// ## Fields
/// * `kind` - classification, maps to the HTTP status code
/// * `message` - client-facing message (replaced by the reason phrase for 5xx)
/// * `action` - optional hint for the client
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "Pon not found");
///
/// let err = AppError::new(ErrorKind::PaymentRequired, "Not enough coins")
///     .with_action("Wait for more coins before pulling again");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
}

/// `Result<T, AppError>`
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new error.
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Attach a client-facing hint.
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message safe to send to a client.
    ///
    /// Server errors collapse to the reason phrase so storage details stay in the logs.
    #[inline]
    pub fn public_message(&self) -> &str {
        if self.kind.is_server_error() {
            self.kind.as_str()
        } else {
            &self.message
        }
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "Pon not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Pon not found");
        assert!(err.action().is_none());
    }

    #[test]
    fn test_public_message_hides_server_details() {
        let err = AppError::new(ErrorKind::InternalServerError, "relation \"users\" does not exist");
        assert_eq!(err.public_message(), "Internal Server Error");

        let err = AppError::new(ErrorKind::PaymentRequired, "Not enough coins");
        assert_eq!(err.public_message(), "Not enough coins");
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::NotFound, "Card not found");
        assert_eq!(err.to_string(), "[Not Found] Card not found");

        let err_with_action = AppError::new(ErrorKind::BadRequest, "variety_id is required")
            .with_action("Pick a variety");
        assert!(err_with_action.to_string().contains("Action:"));
    }
}
