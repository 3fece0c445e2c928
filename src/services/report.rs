//! Report Generation
//!
//! Hands the generated tests and the raw captured pytest output back to the
//! model and writes the returned business-level report verbatim. No local
//! parsing or cross-checking of the model's counts happens here.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use testforge_core::RunLayout;
use testforge_llm::{LlmProvider, Message};

use crate::prompts;
use crate::utils::error::{AppError, AppResult};

/// Service producing the unit and integration business reports.
pub struct ReportService {
    provider: Arc<dyn LlmProvider>,
    layout: RunLayout,
}

impl ReportService {
    /// Create a report service writing into the given layout.
    pub fn new(provider: Arc<dyn LlmProvider>, layout: RunLayout) -> Self {
        Self { provider, layout }
    }

    /// Generate the unit-test report and write it to
    /// `outputs/report_unit.txt`. Returns the written path.
    pub async fn generate_unit_report(&self, tests: &str, coverage: &str) -> AppResult<PathBuf> {
        if tests.trim().is_empty() {
            return Err(AppError::validation("no unit tests to report on"));
        }
        let prompt = prompts::unit_report_prompt(tests, coverage);
        self.generate(prompt, self.layout.unit_report_path()).await
    }

    /// Generate the integration-test report and write it to
    /// `outputs/report_integration.txt`. Returns the written path.
    pub async fn generate_integration_report(
        &self,
        tests: &str,
        coverage: &str,
    ) -> AppResult<PathBuf> {
        if tests.trim().is_empty() {
            return Err(AppError::validation("no integration tests to report on"));
        }
        let prompt = prompts::integration_report_prompt(tests, coverage);
        self.generate(prompt, self.layout.integration_report_path())
            .await
    }

    async fn generate(&self, prompt: String, out_path: PathBuf) -> AppResult<PathBuf> {
        let response = self
            .provider
            .send_message(vec![Message::user(prompt)], None)
            .await?;
        let report = response.into_text()?;
        std::fs::write(&out_path, report)?;
        info!(report = %out_path.display(), "wrote report");
        Ok(out_path)
    }
}
