//! HTTP handlers

pub mod ai;
pub mod auth;
pub mod document;
pub mod health;
pub mod quiz;
