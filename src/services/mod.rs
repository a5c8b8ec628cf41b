//! Application services

pub mod ai_service;
pub mod auth_service;

pub use ai_service::AiService;
pub use auth_service::AuthService;
