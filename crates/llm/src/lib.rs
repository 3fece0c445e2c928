//! Testforge LLM
//!
//! Provides a unified interface for the model backends the pipeline can
//! delegate to:
//! - Anthropic Claude (Messages API)
//! - OpenAI (Chat Completions API)
//!
//! Backends are interchangeable behind the `LlmProvider` trait; swapping one
//! for the other changes no other component's behavior.

pub mod anthropic;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use anthropic::AnthropicProvider;
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::{build_provider, LlmProvider};
pub use types::*;
