//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Registration switch is off
    #[error("Registrations are disabled")]
    RegistrationsDisabled,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Username already taken")]
    UsernameTaken,

    /// Unknown user or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Bearer token does not resolve to a user
    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    /// Body is not JSON, or a field has the wrong type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::RegistrationsDisabled => StatusCode::FORBIDDEN,
            AccountError::InvalidUsername(_)
            | AccountError::InvalidPassword(_)
            | AccountError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AccountError::UsernameTaken => StatusCode::CONFLICT,
            AccountError::InvalidCredentials | AccountError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AccountError::UserNotFound => StatusCode::NOT_FOUND,
            AccountError::Database(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::RegistrationsDisabled => ErrorKind::Forbidden,
            AccountError::InvalidUsername(_)
            | AccountError::InvalidPassword(_)
            | AccountError::InvalidBody(_) => ErrorKind::BadRequest,
            AccountError::UsernameTaken => ErrorKind::Conflict,
            AccountError::InvalidCredentials | AccountError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AccountError::UserNotFound => ErrorKind::NotFound,
            AccountError::Database(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let app_error = AppError::new(self.kind(), self.to_string());
        match self {
            AccountError::InvalidUsername(_) => {
                app_error.with_action("Use 3-16 characters: letters, digits or underscore")
            }
            AccountError::InvalidPassword(_) => {
                app_error.with_action("Use a password of 8-32 characters")
            }
            AccountError::UsernameTaken => app_error.with_action("Please choose another username"),
            AccountError::InvalidToken => app_error.with_action("Please log in again"),
            _ => app_error,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::InvalidToken => {
                tracing::warn!("Request with unknown token");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AccountError {
    fn from(rejection: JsonRejection) -> Self {
        AccountError::InvalidBody(rejection.body_text())
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        err.to_app_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AccountError::RegistrationsDisabled.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AccountError::InvalidUsername("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AccountError::UsernameTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AccountError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AccountError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_status_code_matches_kind() {
        let errors = [
            AccountError::RegistrationsDisabled,
            AccountError::InvalidPassword("short".into()),
            AccountError::UsernameTaken,
            AccountError::InvalidToken,
            AccountError::UserNotFound,
            AccountError::InvalidBody("expected value".into()),
            AccountError::Internal("boom".into()),
        ];
        for err in errors {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code());
        }
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app_error: AppError = AccountError::Internal("pool exhausted".into()).into();
        assert!(app_error.is_server_error());
        assert!(!app_error.public_message().contains("pool"));
    }
}
