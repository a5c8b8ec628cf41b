//! Career-mentor chat passthrough
//! One request to the upstream text-completion service; any failure yields a
//! fixed fallback reply instead of an error response

use crate::{config::AiConfig, error::AppError};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Returned verbatim whenever the upstream call fails for any reason
pub const FALLBACK_REPLY: &str = "I am currently unable to respond. Please try again later.";

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

pub struct AiService {
    client: reqwest::Client,
    config: AiConfig,
}

impl AiService {
    pub fn new(config: AiConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build AI client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Ask the career mentor. Never fails: upstream errors collapse to the
    /// fallback reply.
    pub async fn chat(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("AI completion failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn complete(&self, user_input: &str) -> Result<String, AppError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::Config("AI API key not configured".to_string()))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.api_url,
            self.config.model,
            api_key.expose_secret()
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: mentor_prompt(user_input),
                }],
            }],
        };

        let response: GenerateContentResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("AI request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Internal(format!("AI request rejected: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("AI response decode failed: {}", e)))?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AppError::internal("Empty AI response"))
    }
}

/// Wrap the user's question in the fixed career-mentor preamble
fn mentor_prompt(user_input: &str) -> String {
    format!(
        "You are an expert career mentor for a platform called CareerPath AI. \
         Your role is to provide supportive, insightful, and actionable advice. \
         A user has asked the following question: \"{}\". \
         Please provide a helpful and encouraging response.",
        user_input
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AiConfig {
        AiConfig {
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: None,
            model: "gemini-pro".to_string(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_yields_fallback() {
        // No key configured: chat must return the canned reply, not an error
        let service = AiService::new(test_config()).unwrap();
        let reply = service.chat("How do I become a data engineer?").await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[test]
    fn test_mentor_prompt_embeds_question() {
        let prompt = mentor_prompt("Which skills matter for UX design?");
        assert!(prompt.contains("Which skills matter for UX design?"));
        assert!(prompt.contains("career mentor"));
    }
}
