//! Request Extractors

use axum::extract::FromRequest;

use crate::error::PonError;

/// `axum::Json` whose rejection renders as a [`PonError`] problem body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(PonError))]
pub struct PonJson<T>(pub T);
