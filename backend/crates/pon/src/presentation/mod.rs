//! Presentation Layer
//!
//! HTTP handlers, DTOs, router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use handlers::PonAppState;
pub use router::{pon_router, pon_router_generic};
