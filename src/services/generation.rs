//! Generation Service
//!
//! Wraps the model calls for summarization and test generation. Each call is
//! a fresh single-turn conversation: system prompt + one user message, no
//! carried history.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use testforge_llm::{LlmProvider, Message};

use crate::prompts;
use crate::utils::error::{AppError, AppResult};

/// Service issuing the summary and test-generation model calls.
pub struct GenerationService {
    provider: Arc<dyn LlmProvider>,
}

impl GenerationService {
    /// Create a service over the given provider handle.
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// The provider handle this service calls.
    pub fn provider(&self) -> Arc<dyn LlmProvider> {
        self.provider.clone()
    }

    /// Summarize one source file's business logic.
    pub async fn summarize(&self, content: &str) -> AppResult<String> {
        if content.is_empty() {
            return Err(AppError::validation("file content is empty"));
        }
        debug!(provider = self.provider.name(), "requesting summary");
        let response = self
            .provider
            .send_message(
                vec![Message::user(content)],
                Some(prompts::BUSINESS_LOGIC_PROMPT.to_string()),
            )
            .await?;
        Ok(response.into_text()?)
    }

    /// Generate unit tests for one source file.
    pub async fn generate_unit_tests(&self, path: &Path, content: &str) -> AppResult<String> {
        if content.is_empty() {
            return Err(AppError::validation("file content is empty"));
        }
        let combined = format!("File path: {}\n\n{}", path.display(), content);
        debug!(provider = self.provider.name(), file = %path.display(), "requesting unit tests");
        let response = self
            .provider
            .send_message(
                vec![Message::user(combined)],
                Some(prompts::UNIT_TESTS_PROMPT.to_string()),
            )
            .await?;
        Ok(response.into_text()?)
    }

    /// Generate integration tests from the combined corpus of every
    /// discovered file.
    pub async fn generate_integration_tests(&self, corpus: &str) -> AppResult<String> {
        if corpus.is_empty() {
            return Err(AppError::validation("integration corpus is empty"));
        }
        debug!(provider = self.provider.name(), "requesting integration tests");
        let response = self
            .provider
            .send_message(
                vec![Message::user(corpus)],
                Some(prompts::INTEGRATION_TESTS_PROMPT.to_string()),
            )
            .await?;
        Ok(response.into_text()?)
    }
}
