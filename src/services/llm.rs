// src/services/llm.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// One completion call: a single user prompt against a model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("completion contained no message content")]
    EmptyCompletion,

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A text-generation service that turns a prompt into a single completion.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// OpenAI chat completions over HTTPS.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            Duration::from_secs(config.openai_timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %request.model,
            prompt_len = request.prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = api_error_message(&error_text);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized(message),
                StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(message),
                _ => LlmError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyCompletion)
    }
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path},
    };

    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            prompt: "Write a quiz".to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.7,
        }
    }

    fn client_for(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(
            format!("{}/v1/", server.uri()),
            SecretString::from("sk-test".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4",
                "messages": [{ "role": "user", "content": "Write a quiz" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "[]" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let completion = client_for(&server).complete(&request()).await.unwrap();

        assert_eq!(completion, "[]");
    }

    #[tokio::test]
    async fn unauthorized_surfaces_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err();

        assert!(matches!(err, LlmError::Unauthorized(ref m) if m == "Incorrect API key provided"));
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err();

        assert!(matches!(err, LlmError::RateLimited(ref m) if m == "slow down"));
    }

    #[tokio::test]
    async fn other_failures_keep_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 503, .. }));
        assert_eq!(err.to_string(), "API error 503: overloaded");
    }

    #[tokio::test]
    async fn null_content_is_an_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": null } }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err();

        assert!(matches!(err, LlmError::EmptyCompletion));
    }
}
