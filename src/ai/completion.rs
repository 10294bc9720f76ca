// Completion abstraction over LLM providers
//
// Every provider is driven through the same call shape: one system
// instruction, one user message, fixed generation parameters, raw text back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::claude_client::ClaudeClient;
use super::credentials::ProviderCredentials;
use super::openai_client::OpenAiClient;
use crate::error::CompletionError;

/// Sampling temperature used for every call
pub const TEMPERATURE: f32 = 0.7;

/// Output budget for a list of artist names
pub const ARTIST_MAX_TOKENS: u32 = 1024;

/// Output budget for a full track list
pub const TRACK_MAX_TOKENS: u32 = 2048;

/// Output budget for a playlist title
pub const NAME_MAX_TOKENS: u32 = 50;

/// A single two-turn chat request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send the request and return the first completion's text unmodified
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

/// Build the shared HTTP client used by the provider backends
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Which API a model identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    pub fn for_model(model: &str) -> Self {
        if model.starts_with("anthropic/") || model.starts_with("claude") {
            Provider::Anthropic
        } else {
            Provider::OpenAi
        }
    }
}

/// Dispatches each request to the provider owning the model identifier
pub struct ProviderRouter {
    openai: OpenAiClient,
    claude: ClaudeClient,
}

impl ProviderRouter {
    pub fn new(credentials: &ProviderCredentials, client: Client) -> Self {
        Self {
            openai: OpenAiClient::new(
                credentials.openai_api_key.clone(),
                credentials.openai_base_url.clone(),
                client.clone(),
            ),
            claude: ClaudeClient::new(
                credentials.anthropic_api_key.clone(),
                credentials.anthropic_base_url.clone(),
                client,
            ),
        }
    }
}

#[async_trait]
impl CompletionBackend for ProviderRouter {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        match Provider::for_model(&request.model) {
            Provider::OpenAi => self.openai.complete(request).await,
            Provider::Anthropic => self.claude.complete(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_for_model() {
        assert_eq!(Provider::for_model("gpt-4"), Provider::OpenAi);
        assert_eq!(Provider::for_model("custom-model-x"), Provider::OpenAi);
        assert_eq!(
            Provider::for_model("anthropic/claude-3-5-sonnet-latest"),
            Provider::Anthropic
        );
        assert_eq!(Provider::for_model("claude-3-haiku"), Provider::Anthropic);
    }

    #[tokio::test]
    async fn test_router_reports_missing_key_for_selected_provider() {
        let creds = ProviderCredentials::new(Some("sk-openai".into()), None)
            .with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9");
        let router = ProviderRouter::new(&creds, Client::new());

        let request = CompletionRequest {
            model: "anthropic/claude-3-5-sonnet-latest".into(),
            system: "s".into(),
            user: "u".into(),
            max_tokens: 10,
            temperature: TEMPERATURE,
        };
        let err = router.complete(&request).await.unwrap_err();
        assert!(matches!(err, CompletionError::MissingCredentials("anthropic")));
    }
}
