// OpenAI chat completions client
//
// Also works against any OpenAI-compatible endpoint by changing the base URL.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::claude_client::Message;
use super::completion::{CompletionBackend, CompletionRequest};
use crate::error::CompletionError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>, base_url: String, client: Client) -> Self {
        Self {
            api_key,
            base_url,
            client,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingCredentials("openai"))?;

        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                Message {
                    role: "user".to_string(),
                    content: request.user.clone(),
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        let chat_response: ChatResponse = response.json().await?;
        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyCompletion)?;

        debug!(
            model = body.model,
            finish_reason = choice.finish_reason.as_deref().unwrap_or("none"),
            "openai completion received"
        );

        choice.message.content.ok_or(CompletionError::EmptyCompletion)
    }
}
