//! Onboarding quiz models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Stored quiz answers, one row per user
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Quiz {
    pub id: Uuid,
    pub user_id: Uuid,
    pub interests: String,
    pub skills: String,
    pub goals: String,
    pub achievements: Vec<String>,
    pub extracurriculars: Vec<String>,
    pub dream_career: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Quiz submission; POST both creates and updates
#[derive(Debug, Deserialize, Validate)]
pub struct QuizSubmission {
    #[validate(length(min = 1, message = "interests is required"))]
    pub interests: String,

    #[validate(length(min = 1, message = "skills is required"))]
    pub skills: String,

    #[validate(length(min = 1, message = "goals is required"))]
    pub goals: String,

    #[serde(default)]
    pub achievements: Vec<String>,

    #[serde(default)]
    pub extracurriculars: Vec<String>,

    #[serde(default)]
    pub dream_career: Option<String>,
}
