//! Authentication building blocks: password hashing, the dual-token codec,
//! refresh-cookie construction and the access-guard middleware

pub mod cookies;
pub mod middleware;
pub mod password;
pub mod tokens;

pub use password::PasswordHasher;
pub use tokens::{AccessToken, RefreshToken, TokenCodec};
