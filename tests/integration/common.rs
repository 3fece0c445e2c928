//! Shared test helpers: zip archive builders and provider doubles.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use testforge_llm::{
    LlmError, LlmProvider, LlmResponse, LlmResult, Message, ProviderConfig, UsageStats,
};

/// Build a zip archive at `dir/<name>` from (entry-name, content) pairs.
pub fn build_archive(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let archive_path = dir.join(name);
    let file = std::fs::File::create(&archive_path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (entry_name, content) in entries {
        writer.start_file(*entry_name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    archive_path
}

/// Provider double that answers each task from its system prompt:
/// generation requests get a fenced pytest block, summaries get prose.
pub struct ScriptedProvider {
    config: ProviderConfig,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig::default(),
        })
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        _messages: Vec<Message>,
        system: Option<String>,
    ) -> LlmResult<LlmResponse> {
        let system = system.unwrap_or_default();
        let content = if system.contains("unit tests") {
            "Here you go:\n```python\nimport pytest\n\ndef test_unit():\n    assert 1 + 1 == 2\n```"
        } else if system.contains("integration tests") {
            "```python\nimport pytest\n\ndef test_integration():\n    assert True\n```"
        } else {
            "Summarized business logic."
        };
        Ok(LlmResponse {
            content: Some(content.to_string()),
            model: "scripted".to_string(),
            usage: UsageStats::default(),
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// Provider double whose every call fails, for abort-path tests.
pub struct FailingProvider {
    config: ProviderConfig,
}

impl FailingProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig::default(),
        })
    }
}

#[async_trait]
impl LlmProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        _messages: Vec<Message>,
        _system: Option<String>,
    ) -> LlmResult<LlmResponse> {
        Err(LlmError::ServerError {
            message: "backend unavailable".to_string(),
            status: Some(500),
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        Err(LlmError::ServerError {
            message: "backend unavailable".to_string(),
            status: Some(500),
        })
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
