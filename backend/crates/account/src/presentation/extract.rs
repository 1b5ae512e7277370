//! Request Extractors

use axum::extract::FromRequest;

use crate::error::AccountError;

/// `axum::Json` whose rejection renders as an [`AccountError`] problem body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AccountError))]
pub struct AccountJson<T>(pub T);
