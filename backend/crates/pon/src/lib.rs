//! Pon (card pack) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Catalog model, draw service, inventory entities, repository traits
//! - `application/` - Use cases (browse, pull, inventory)
//! - `infra/` - Catalog loader, PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Pull Model
//! - Draw is uniform over the pon's cards, then over the card's varieties
//! - Ledger append and coin debit settle as one unit with a conditional debit
//!   (`coins >= cost`), so concurrent pulls can never overdraw
//! - The catalog is an immutable snapshot, swapped wholesale on reload

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PonConfig;
pub use error::{PonError, PonResult};
pub use infra::catalog::{SharedCatalog, load_catalog};
pub use infra::memory::MemoryStore;
pub use infra::postgres::PgPonRepository;
pub use presentation::router::{pon_router, pon_router_generic};

pub mod models {
    pub use crate::domain::catalog::*;
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
