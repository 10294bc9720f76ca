// AI module for LLM-backed playlist curation
//
// This module provides:
// - Model alias routing and provider credentials
// - Completion clients for OpenAI and Claude behind one trait
// - Library context and system prompts for artist/track selection
// - Strict parsing of the model's JSON answers
// - The two-stage recommender tying it together

pub mod claude_client;
pub mod completion;
pub mod context_builder;
pub mod credentials;
pub mod model_router;
pub mod openai_client;
pub mod recommender;
pub mod response_parser;
pub mod system_prompt;

// Re-export commonly used types
pub use completion::{CompletionBackend, CompletionRequest, ProviderRouter};
pub use context_builder::LibraryContextBuilder;
pub use credentials::ProviderCredentials;
pub use model_router::ModelRouter;
pub use recommender::Recommender;
pub use response_parser::{parse_artists, parse_tracks};
