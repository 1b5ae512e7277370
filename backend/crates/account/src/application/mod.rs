//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod identify;
pub mod login;
pub mod register;

// Re-exports
pub use config::AccountConfig;
pub use identify::IdentifyUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
