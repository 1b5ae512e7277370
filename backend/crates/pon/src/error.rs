//! Pon Error Types
//!
//! Pon-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use account::AccountError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Pon-specific result type alias
pub type PonResult<T> = Result<T, PonError>;

/// Pon-specific error variants
#[derive(Debug, Error)]
pub enum PonError {
    /// Required request field absent or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Body is not JSON, or a field has the wrong type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Pon not found")]
    PonNotFound,

    #[error("Card not found")]
    CardNotFound,

    #[error("Variety not found")]
    VarietyNotFound,

    /// Card has varieties but none was named
    #[error("variety_id is required for cards with varieties")]
    VarietyRequired,

    #[error("Image file not found")]
    ImageNotFound,

    #[error("User not found")]
    UserNotFound,

    /// Balance below the pon's cost
    #[error("Insufficient coins")]
    InsufficientCoins,

    /// Error from the account layer (token resolution)
    #[error(transparent)]
    Account(AccountError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PonError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PonError::MissingField(_) | PonError::InvalidBody(_) | PonError::VarietyRequired => {
                StatusCode::BAD_REQUEST
            }
            PonError::InvalidToken => StatusCode::UNAUTHORIZED,
            PonError::InsufficientCoins => StatusCode::PAYMENT_REQUIRED,
            PonError::PonNotFound
            | PonError::CardNotFound
            | PonError::VarietyNotFound
            | PonError::ImageNotFound
            | PonError::UserNotFound => StatusCode::NOT_FOUND,
            PonError::Account(e) => e.status_code(),
            PonError::Database(_) | PonError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PonError::MissingField(_) | PonError::InvalidBody(_) | PonError::VarietyRequired => {
                ErrorKind::BadRequest
            }
            PonError::InvalidToken => ErrorKind::Unauthorized,
            PonError::InsufficientCoins => ErrorKind::PaymentRequired,
            PonError::PonNotFound
            | PonError::CardNotFound
            | PonError::VarietyNotFound
            | PonError::ImageNotFound
            | PonError::UserNotFound => ErrorKind::NotFound,
            PonError::Account(e) => e.kind(),
            PonError::Database(_) | PonError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            PonError::Account(e) => e.to_app_error(),
            PonError::InsufficientCoins => AppError::new(self.kind(), self.to_string())
                .with_action("Earn more coins before pulling again"),
            PonError::InvalidToken => {
                AppError::new(self.kind(), self.to_string()).with_action("Please log in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PonError::Database(e) => {
                tracing::error!(error = %e, "Pon database error");
            }
            PonError::Internal(msg) => {
                tracing::error!(message = %msg, "Pon internal error");
            }
            PonError::Account(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, "Account lookup failed");
            }
            PonError::InvalidToken => {
                tracing::warn!("Pon request with unknown token");
            }
            _ => {
                tracing::debug!(error = %self, "Pon error");
            }
        }
    }
}

impl From<AccountError> for PonError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidToken => PonError::InvalidToken,
            AccountError::UserNotFound => PonError::UserNotFound,
            other => PonError::Account(other),
        }
    }
}

impl From<JsonRejection> for PonError {
    fn from(rejection: JsonRejection) -> Self {
        PonError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for PonError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<PonError> for AppError {
    fn from(err: PonError) -> Self {
        err.to_app_error()
    }
}
