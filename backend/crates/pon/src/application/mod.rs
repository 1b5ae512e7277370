//! Application Layer - Use Cases

pub mod browse;
pub mod config;
pub mod inventory;
pub mod pull;

// Re-exports
pub use browse::BrowseUseCase;
pub use config::PonConfig;
pub use inventory::InventoryUseCase;
pub use pull::{PullOutput, PullUseCase};
