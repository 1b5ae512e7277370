//! Domain Layer
//!
//! - Catalog model (pon, card and variety definitions)
//! - Inventory entities and the pull settlement
//! - Domain services (uniform draw)
//! - Repository traits (interfaces)

pub mod catalog;
pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
