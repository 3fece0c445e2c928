//! Pipeline Orchestrator
//!
//! Drives summary and test generation across the extracted archive: walks
//! the discovered Python files, fans the per-file work out through a bounded
//! worker pool, writes test artifacts into the fixed layout, and persists
//! the summaries.
//!
//! Per-file results are aggregated into path-ordered maps, so artifacts and
//! persisted output are identical across runs regardless of task completion
//! order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::{stream, StreamExt};
use tracing::{info, warn};

use testforge_core::{RunConfig, RunLayout};
use testforge_llm::LlmProvider;
use testforge_pipeline::{discover_python_files, extract_archive, extract_code_block, read_source};

use crate::models::{FileArtifacts, GeneratedTest, PipelineOutput};
use crate::services::generation::GenerationService;
use crate::utils::error::{AppError, AppResult};

/// Everything produced for one source file before aggregation.
struct FileOutcome {
    path: PathBuf,
    content: String,
    summary: String,
    unit_test: Option<GeneratedTest>,
}

/// Orchestrates one full generation run over an archive.
pub struct PipelineOrchestrator {
    generation: GenerationService,
    config: RunConfig,
    layout: RunLayout,
}

impl PipelineOrchestrator {
    /// Create an orchestrator for the given provider and run configuration.
    pub fn new(provider: Arc<dyn LlmProvider>, config: RunConfig) -> AppResult<Self> {
        config.validate()?;
        let layout = RunLayout::new(&config.work_dir);
        Ok(Self {
            generation: GenerationService::new(provider),
            config,
            layout,
        })
    }

    /// The layout this run writes into.
    pub fn layout(&self) -> &RunLayout {
        &self.layout
    }

    /// Extract the archive and run generation over every discovered file.
    pub async fn run(&self, archive_path: &Path) -> AppResult<PipelineOutput> {
        info!(archive = %archive_path.display(), "extracting archive");
        extract_archive(archive_path, &self.layout.extract_dir())?;
        self.layout.ensure_dirs()?;

        let files = discover_python_files(&self.layout.extract_dir());
        if files.is_empty() {
            warn!("no Python files discovered in archive");
            self.persist_summaries(&BTreeMap::new())?;
            return Ok(PipelineOutput::default());
        }
        info!(count = files.len(), "processing discovered Python files");

        self.process_files(&files).await
    }

    /// Fan the per-file work out, then aggregate and write artifacts.
    async fn process_files(&self, files: &[PathBuf]) -> AppResult<PipelineOutput> {
        // `buffered` polls up to `concurrency` futures at once but yields
        // results in input order, which keeps aggregation deterministic. A
        // file task holds at most one in-flight model call, so this also
        // bounds concurrent requests against the backend.
        let tasks: Vec<_> = files
            .iter()
            .map(|path| self.process_file(path.clone()))
            .collect();
        let results: Vec<AppResult<Option<FileOutcome>>> = stream::iter(tasks)
            .buffered(self.config.concurrency)
            .collect()
            .await;

        let mut output = PipelineOutput::default();
        let mut corpus_parts = Vec::new();

        for result in results {
            let Some(outcome) = result? else {
                continue; // empty file, already logged
            };

            if let Some(test) = &outcome.unit_test {
                let file_name = file_name_of(&outcome.path)?;
                let artifact = format!(
                    "{}\n\n{}\n",
                    self.path_header(&outcome.path),
                    test.body
                );
                let test_path = self.layout.unit_test_path(file_name);
                std::fs::write(&test_path, artifact)?;
                info!(test_file = %test_path.display(), "wrote unit tests");
                output
                    .unit_tests
                    .insert(outcome.path.clone(), test.body.clone());
            }

            corpus_parts.push(format!(
                "File path: {}\n\n{}",
                outcome.path.display(),
                outcome.content
            ));
            output.files.insert(
                outcome.path,
                FileArtifacts {
                    summary: outcome.summary,
                    unit_test: outcome.unit_test.map(|t| t.body),
                },
            );
        }

        // Integration tests are generated once per run, from the full
        // discovered set.
        if !output.files.is_empty() {
            let corpus = corpus_parts.join("\n\n---\n\n");
            let raw = self.generation.generate_integration_tests(&corpus).await?;
            let body = self.extract_or_fallback(raw, "integration tests");
            let artifact = format!("{}\n\n{}\n", self.integration_header(), body);
            let test_path = self.layout.integration_test_path();
            std::fs::write(&test_path, artifact)?;
            info!(test_file = %test_path.display(), "wrote integration tests");
            output.integration_test = Some(body);
        }

        self.persist_summaries(&output.files)?;
        Ok(output)
    }

    /// Read, summarize, and (when selected) generate unit tests for one file.
    async fn process_file(&self, path: PathBuf) -> AppResult<Option<FileOutcome>> {
        let content = read_source(&path)?;
        if content.trim().is_empty() {
            warn!(file = %path.display(), "file content is empty, skipping");
            return Ok(None);
        }

        let summary = self.generation.summarize(&content).await?;

        let file_name = file_name_of(&path)?;
        let unit_test = if self.config.selects_for_unit_tests(file_name) {
            let raw = self.generation.generate_unit_tests(&path, &content).await?;
            let body = self.extract_or_fallback(raw.clone(), file_name);
            Some(GeneratedTest { raw, body })
        } else {
            None
        };

        Ok(Some(FileOutcome {
            path,
            content,
            summary,
            unit_test,
        }))
    }

    /// Extract the fenced body of a generation response, falling back to the
    /// trimmed raw text when the model returned no fence.
    fn extract_or_fallback(&self, raw: String, what: &str) -> String {
        match extract_code_block(&raw) {
            Some(body) => body,
            None => {
                warn!(artifact = what, "no fenced code block in response, using raw text");
                raw.trim().to_string()
            }
        }
    }

    /// Import-path header prepended to a unit-test file, pointing at the
    /// source file's directory.
    fn path_header(&self, source_path: &Path) -> String {
        let dir = source_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.layout.extract_dir());
        format!("import sys\nsys.path.insert(0, '{}')", dir.display())
    }

    /// Import-path header prepended to the integration-test file, pointing
    /// at the extraction root.
    fn integration_header(&self) -> String {
        format!(
            "import sys\nsys.path.insert(0, '{}')",
            self.layout.extract_dir().display()
        )
    }

    /// Persist the per-file summaries to `outputs/context.txt`.
    fn persist_summaries(&self, files: &BTreeMap<PathBuf, FileArtifacts>) -> AppResult<()> {
        let mut out = String::new();
        for (path, artifacts) in files {
            out.push_str(&format!("File: {}\n", path.display()));
            out.push_str(&format!("Summary: {}\n", artifacts.summary));
            out.push_str(&"=".repeat(40));
            out.push('\n');
        }
        std::fs::write(self.layout.context_path(), out)?;
        Ok(())
    }
}

/// File name of a path as UTF-8, or a validation error.
fn file_name_of(path: &Path) -> AppResult<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::validation(format!("invalid file name: {}", path.display())))
}
