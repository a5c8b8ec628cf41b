//! Quiz HTTP handlers

use crate::{
    auth::middleware::AuthContext, error::AppError, middleware::AppState,
    models::quiz::QuizSubmission, repository::QuizRepository,
};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// Submit or update the caller's quiz answers
pub async fn submit(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Json(submission): Json<QuizSubmission>,
) -> Result<impl IntoResponse, AppError> {
    submission.validate()?;

    let quiz = QuizRepository::new(state.db.clone())
        .upsert(auth.user_id, &submission)
        .await?;

    Ok(Json(quiz))
}

/// Fetch the caller's quiz answers
pub async fn get_own(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let quiz = QuizRepository::new(state.db.clone())
        .find_by_user(auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("quiz"))?;

    Ok(Json(quiz))
}
