//! User domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user account. Deliberately not `Serialize`: the password hash
/// must never leave the process, so responses go through `UserResponse`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,

    // Profile fields, opaque to the auth core
    pub age: i32,
    pub education: String,
    pub location: String,
    pub role: String, // pre-university, university, job-seeker
    pub parent_email: Option<String>,
    pub achievements: Vec<String>,
    pub certifications: Vec<String>,
    pub wellbeing_score: i32,

    pub created_at: DateTime<Utc>,
}

/// Closed role set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    PreUniversity,
    University,
    JobSeeker,
}

impl Role {
    pub const ALLOWED: [&'static str; 3] = ["pre-university", "university", "job-seeker"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pre-university" => Some(Role::PreUniversity),
            "university" => Some(Role::University),
            "job-seeker" => Some(Role::JobSeeker),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::PreUniversity => "pre-university",
            Role::University => "university",
            Role::JobSeeker => "job-seeker",
        }
    }
}

/// User response (without sensitive data)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub education: String,
    pub location: String,
    pub role: String,
    pub parent_email: Option<String>,
    pub achievements: Vec<String>,
    pub certifications: Vec<String>,
    pub wellbeing_score: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            education: user.education,
            location: user.location,
            role: user.role,
            parent_email: user.parent_email,
            achievements: user.achievements,
            certifications: user.certifications,
            wellbeing_score: user.wellbeing_score,
            created_at: user.created_at,
        }
    }
}
