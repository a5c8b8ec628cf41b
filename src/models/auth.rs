//! Authentication request/response DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request. Field presence is validated here; the closed role
/// set is enforced by the session issuer.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    #[validate(range(min = 1, max = 120, message = "age must be between 1 and 120"))]
    pub age: i32,

    #[validate(length(min = 1, message = "education is required"))]
    pub education: String,

    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,

    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,

    #[serde(default)]
    pub parent_email: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by register, login and refresh: the access token only. The
/// refresh token travels exclusively in the cookie.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}
