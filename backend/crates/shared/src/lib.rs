//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the `account` and `pon` crates:
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP classification
//! - Typed identifiers
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
