// Claude API client
//
// Implements the completion call against Anthropic's Messages API:
// - System instruction goes in the top-level `system` field
// - One user message per request
// - Text blocks of the reply are joined and returned as-is

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::completion::{CompletionBackend, CompletionRequest};
use crate::error::CompletionError;

const CLAUDE_VERSION: &str = "2023-06-01";
const PROVIDER_PREFIX: &str = "anthropic/";

/// Message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Request to Claude API
#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message>,
}

/// Response from Claude API
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

pub struct ClaudeClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl ClaudeClient {
    pub fn new(api_key: Option<String>, base_url: String, client: Client) -> Self {
        Self {
            api_key,
            base_url,
            client,
        }
    }

    /// Model name as the Messages API expects it
    fn api_model(model: &str) -> &str {
        model.strip_prefix(PROVIDER_PREFIX).unwrap_or(model)
    }
}

#[async_trait]
impl CompletionBackend for ClaudeClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingCredentials("anthropic"))?;

        let body = ClaudeRequest {
            model: Self::api_model(&request.model),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: &request.system,
            messages: vec![Message {
                role: "user".to_string(),
                content: request.user.clone(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", CLAUDE_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::Status { status, body });
        }

        let claude_response: ClaudeResponse = response.json().await?;
        debug!(
            model = body.model,
            stop_reason = claude_response.stop_reason.as_deref().unwrap_or("none"),
            "claude completion received"
        );

        claude_response
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .map(|block| block.text)
            .ok_or(CompletionError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(model: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            system: "system text".to_string(),
            user: "user text".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }

    #[test]
    fn test_api_model_strips_provider_prefix() {
        assert_eq!(
            ClaudeClient::api_model("anthropic/claude-3-5-sonnet-latest"),
            "claude-3-5-sonnet-latest"
        );
        assert_eq!(ClaudeClient::api_model("claude-3-haiku"), "claude-3-haiku");
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_single_user_turn() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", CLAUDE_VERSION))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-3-5-sonnet-latest",
                "system": "system text",
                "max_tokens": 1024,
                "messages": [{"role": "user", "content": "user text"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": " {\"artists\": [\"A\"]} "}],
                "stop_reason": "end_turn"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ClaudeClient::new(Some("sk-ant-test".into()), server.uri(), Client::new());
        let text = client
            .complete(&request("anthropic/claude-3-5-sonnet-latest"))
            .await
            .unwrap();

        // Raw text comes back untrimmed
        assert_eq!(text, " {\"artists\": [\"A\"]} ");
    }

    #[tokio::test]
    async fn test_complete_returns_first_text_block_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [
                    {"type": "text", "text": "{\"artists\": [\"A\"]}"},
                    {"type": "text", "text": "Hope this helps!"}
                ]
            })))
            .mount(&server)
            .await;

        let client = ClaudeClient::new(Some("sk-ant-test".into()), server.uri(), Client::new());
        let text = client.complete(&request("claude-3-haiku")).await.unwrap();

        assert_eq!(text, "{\"artists\": [\"A\"]}");
    }

    #[tokio::test]
    async fn test_complete_surfaces_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = ClaudeClient::new(Some("sk-ant-test".into()), server.uri(), Client::new());
        let err = client.complete(&request("claude-3-haiku")).await.unwrap_err();

        match err {
            CompletionError::Status { status, body } => {
                assert_eq!(status.as_u16(), 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
