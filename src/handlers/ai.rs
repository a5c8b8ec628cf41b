//! AI chat passthrough handler

use crate::{auth::middleware::AuthContext, error::AppError, middleware::AppState};
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Forward a prompt to the career mentor
pub async fn chat(
    State(state): State<Arc<AppState>>,
    _auth: AuthContext,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.prompt.trim().is_empty() {
        return Err(AppError::bad_request("Prompt is required"));
    }

    let response = state.ai.chat(&req.prompt).await;

    Ok(Json(ChatResponse { response }))
}
