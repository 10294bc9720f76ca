// Provider credentials
//
// Keys are handed to the completion clients at construction time instead of
// being written into the process environment, so two clients with different
// keys can live side by side.

use std::fmt;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";
pub const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1";

#[derive(Clone)]
pub struct ProviderCredentials {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub openai_base_url: String,
    pub anthropic_base_url: String,
}

impl ProviderCredentials {
    pub fn new(openai_api_key: Option<String>, anthropic_api_key: Option<String>) -> Self {
        Self {
            openai_api_key: non_empty(openai_api_key),
            anthropic_api_key: non_empty(anthropic_api_key),
            openai_base_url: OPENAI_API_URL.to_string(),
            anthropic_base_url: CLAUDE_API_URL.to_string(),
        }
    }

    /// Point both providers somewhere else (proxies, tests)
    pub fn with_base_urls(
        mut self,
        openai: impl Into<String>,
        anthropic: impl Into<String>,
    ) -> Self {
        self.openai_base_url = openai.into().trim_end_matches('/').to_string();
        self.anthropic_base_url = anthropic.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_openai(&self) -> bool {
        self.openai_api_key.is_some()
    }

    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.is_some()
    }
}

fn non_empty(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

fn redact(key: &Option<String>) -> &'static str {
    if key.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

// Keys never end up in logs through Debug
impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field("openai_base_url", &self.openai_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .finish()
    }
}
