//! Quiz repository

use crate::{
    error::AppError,
    models::quiz::{Quiz, QuizSubmission},
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct QuizRepository {
    db: PgPool,
}

impl QuizRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create or update the caller's quiz answers. One row per user, enforced
    /// by the unique index on user_id.
    pub async fn upsert(&self, user_id: Uuid, submission: &QuizSubmission) -> Result<Quiz, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (user_id, interests, skills, goals, achievements, extracurriculars, dream_career)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                interests = EXCLUDED.interests,
                skills = EXCLUDED.skills,
                goals = EXCLUDED.goals,
                achievements = EXCLUDED.achievements,
                extracurriculars = EXCLUDED.extracurriculars,
                dream_career = EXCLUDED.dream_career,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&submission.interests)
        .bind(&submission.skills)
        .bind(&submission.goals)
        .bind(&submission.achievements)
        .bind(&submission.extracurriculars)
        .bind(&submission.dream_career)
        .fetch_one(&self.db)
        .await?;

        Ok(quiz)
    }

    /// Fetch the caller's quiz answers
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Quiz>, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>("SELECT * FROM quizzes WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(quiz)
    }
}
