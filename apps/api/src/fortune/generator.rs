//! Sentence generation: one model call per attempt, no moderation, no retry.
//!
//! `SentenceGenerator` is the seam the orchestrator drives; `LlmSentenceGenerator`
//! is the production backend over `llm_client`.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::fortune::prompts::build_user_prompt;
use crate::fortune::themes::Theme;
use crate::llm_client::{LlmClient, LlmError};

/// Recoverable failures of a single generation attempt.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("upstream failure: {0}")]
    Upstream(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MalformedResponse(msg) => GenerationError::MalformedResponse(msg),
            other => GenerationError::Upstream(other.to_string()),
        }
    }
}

/// Everything sent to the model for one attempt. Built fresh each time.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub theme: &'a Theme,
    pub system_prompt: &'a str,
    pub user_prompt: String,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(theme: &'a Theme, system_prompt: &'a str) -> Self {
        Self {
            theme,
            system_prompt,
            user_prompt: build_user_prompt(theme.as_str()),
        }
    }
}

/// Produces one raw candidate sentence for a theme.
#[async_trait]
pub trait SentenceGenerator: Send + Sync {
    async fn generate(&self, theme: &Theme) -> Result<String, GenerationError>;
}

/// Production generator backed by the Anthropic Messages API.
pub struct LlmSentenceGenerator {
    llm: LlmClient,
    system_prompt: String,
    max_tokens: u32,
}

impl LlmSentenceGenerator {
    pub fn new(llm: LlmClient, system_prompt: String, max_tokens: u32) -> Self {
        Self {
            llm,
            system_prompt,
            max_tokens,
        }
    }
}

#[async_trait]
impl SentenceGenerator for LlmSentenceGenerator {
    async fn generate(&self, theme: &Theme) -> Result<String, GenerationError> {
        let request = GenerationRequest::new(theme, &self.system_prompt);
        debug!(theme = %request.theme, max_tokens = self.max_tokens, "Requesting candidate");
        let text = self
            .llm
            .call_text(request.system_prompt, &request.user_prompt, self.max_tokens)
            .await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generator_for(server: &MockServer) -> LlmSentenceGenerator {
        let llm =
            LlmClient::new("k".to_string(), &server.uri(), Duration::from_secs(5)).unwrap();
        LlmSentenceGenerator::new(llm, "system rules".to_string(), 150)
    }

    #[test]
    fn test_request_interpolates_theme() {
        let theme = Theme::new("a day with far too many meetings");
        let request = GenerationRequest::new(&theme, "sys");
        assert!(request.user_prompt.contains("a day with far too many meetings"));
        assert_eq!(request.system_prompt, "sys");
        assert_eq!(request.theme, &theme);
    }

    #[test]
    fn test_llm_error_mapping() {
        let api = LlmError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(matches!(
            GenerationError::from(api),
            GenerationError::Upstream(ref m) if m.contains("500")
        ));
        assert!(matches!(
            GenerationError::from(LlmError::MalformedResponse("x".to_string())),
            GenerationError::MalformedResponse(_)
        ));
    }

    #[tokio::test]
    async fn test_generate_sends_theme_and_returns_trimmed_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "system": "system rules",
                "max_tokens": 150,
                "messages": [{
                    "role": "user",
                    "content": "Today's theme: a morning running on coffee. Write today's fortune sentence."
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "\nThird coffee already. Your heart is working overtime too.\n"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = generator_for(&server)
            .generate(&Theme::new("a morning running on coffee"))
            .await
            .unwrap();
        assert_eq!(text, "Third coffee already. Your heart is working overtime too.");
    }

    #[tokio::test]
    async fn test_generate_maps_server_error_to_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .expect(1)
            .mount(&server)
            .await;

        let err = generator_for(&server)
            .generate(&Theme::new("t"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_generate_maps_bad_shape_to_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "nope"})))
            .mount(&server)
            .await;

        let err = generator_for(&server)
            .generate(&Theme::new("t"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }
}
