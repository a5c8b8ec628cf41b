//! Domain models and request/response DTOs

pub mod auth;
pub mod document;
pub mod quiz;
pub mod user;
