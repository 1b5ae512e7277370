//! Value Object Module

pub mod session_token;
pub mod user_name;
pub mod user_password;

pub use session_token::{SessionToken, TokenDigest};
pub use user_name::UserName;
pub use user_password::{RawPassword, UserPassword};
