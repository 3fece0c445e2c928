//! LLM Types
//!
//! Shared message, configuration, and error types for the provider
//! implementations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported provider backends.
///
/// Backend selection is an explicit enumerated choice resolved to a concrete
/// provider handle at startup; no dynamic name lookup happens after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Anthropic Messages API
    Anthropic,
    /// OpenAI Chat Completions API
    OpenAI,
}

impl ProviderKind {
    /// Environment variable the backend reads its API key from.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Default model for the backend.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "claude-3-haiku-20240307",
            ProviderKind::OpenAI => "gpt-4-turbo",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Anthropic => write!(f, "anthropic"),
            ProviderKind::OpenAI => write!(f, "openai"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "openai" | "gpt" => Ok(ProviderKind::OpenAI),
            other => Err(format!("unknown provider backend: {}", other)),
        }
    }
}

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// End-user input
    User,
    /// Model output
    Assistant,
}

/// A single text message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the message
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Configuration for a provider instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Which backend this config targets
    pub provider: ProviderKind,
    /// API key; `None` fails fast on the first request
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Override of the default API endpoint
    pub base_url: Option<String>,
    /// Maximum tokens to generate per response
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Anthropic,
            api_key: None,
            model: ProviderKind::Anthropic.default_model().to_string(),
            base_url: None,
            max_tokens: 4096,
            temperature: 0.0,
        }
    }
}

impl ProviderConfig {
    /// Create a config for a backend with its default model, reading the API
    /// key from the backend's environment variable.
    pub fn from_env(provider: ProviderKind) -> Self {
        Self {
            provider,
            api_key: std::env::var(provider.api_key_env()).ok(),
            model: provider.default_model().to_string(),
            ..Default::default()
        }
    }
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    /// Tokens consumed by the request
    pub input_tokens: u32,
    /// Tokens generated in the response
    pub output_tokens: u32,
}

/// A complete (non-streaming) model response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    /// Generated text, if any
    pub content: Option<String>,
    /// Model that produced the response
    pub model: String,
    /// Token usage for the exchange
    pub usage: UsageStats,
}

impl LlmResponse {
    /// Consume the response, yielding its text or an error when the model
    /// returned nothing.
    pub fn into_text(self) -> LlmResult<String> {
        match self.content {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(LlmError::EmptyResponse {
                model: self.model,
            }),
        }
    }
}

/// Errors produced by provider implementations.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Missing or rejected credentials
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Provider-supplied detail
        message: String,
    },

    /// The requested model does not exist
    #[error("Model not found: {model}")]
    ModelNotFound {
        /// Model identifier from the request or response body
        model: String,
    },

    /// Upstream quota exhausted
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Provider-supplied detail
        message: String,
    },

    /// Request rejected as malformed
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Provider-supplied detail
        message: String,
    },

    /// Provider-side failure
    #[error("Server error ({status:?}): {message}")]
    ServerError {
        /// Provider-supplied detail
        message: String,
        /// HTTP status, when known
        status: Option<u16>,
    },

    /// Transport-level failure
    #[error("Network error: {message}")]
    NetworkError {
        /// Underlying reqwest error text
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Parse error: {message}")]
    ParseError {
        /// Detail of the mismatch
        message: String,
    },

    /// The model returned no usable text
    #[error("Empty response from model {model}")]
    EmptyResponse {
        /// Model that produced the empty response
        model: String,
    },

    /// Anything else
    #[error("{message}")]
    Other {
        /// Detail
        message: String,
    },
}

/// Result type alias for provider operations.
pub type LlmResult<T> = Result<T, LlmError>;
