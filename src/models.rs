//! Pipeline Data Models
//!
//! Artifacts produced by a run. Maps are keyed by source path in `BTreeMap`s
//! so iteration order, and everything persisted from it, is deterministic by
//! path regardless of task completion order.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use testforge_pipeline::CommandOutcome;

/// A generated test: the raw model response and the extracted code body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTest {
    /// Full model response text
    pub raw: String,
    /// Code body extracted from the first fenced block (or the trimmed raw
    /// response when the model returned no fence)
    pub body: String,
}

/// Per-file artifacts collected by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileArtifacts {
    /// Business-logic summary of the file
    pub summary: String,
    /// Unit-test body, when the file was selected for unit tests
    pub unit_test: Option<String>,
}

/// Everything a pipeline run produced before test execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    /// Summary and optional unit-test body per source file
    pub files: BTreeMap<PathBuf, FileArtifacts>,
    /// Unit-test bodies per source file (the subset that was selected)
    pub unit_tests: BTreeMap<PathBuf, String>,
    /// The single integration-test body, when any file was processed
    pub integration_test: Option<String>,
}

impl PipelineOutput {
    /// Whether the run produced nothing (no Python files discovered).
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All unit-test bodies joined for the report prompt, labeled by file.
    pub fn unit_tests_corpus(&self) -> String {
        self.unit_tests
            .iter()
            .map(|(path, body)| format!("# Tests for {}\n{}", path.display(), body))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Final record of a run, logged and serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Backend name the run used
    pub backend: String,
    /// Model identifier the run used
    pub model: String,
    /// Files that received a summary
    pub files_processed: usize,
    /// Unit-test files written
    pub unit_tests_written: usize,
    /// Whether the integration-test file was written
    pub integration_test_written: bool,
    /// Outcomes of the pip/pytest invocations, in execution order
    pub command_outcomes: Vec<CommandOutcome>,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_output() {
        let output = PipelineOutput::default();
        assert!(output.is_empty());
        assert_eq!(output.unit_tests_corpus(), "");
    }

    #[test]
    fn test_unit_tests_corpus_is_path_ordered() {
        let mut output = PipelineOutput::default();
        output
            .unit_tests
            .insert(PathBuf::from("b.py"), "def test_b(): pass".to_string());
        output
            .unit_tests
            .insert(PathBuf::from("a.py"), "def test_a(): pass".to_string());

        let corpus = output.unit_tests_corpus();
        let a = corpus.find("a.py").unwrap();
        let b = corpus.find("b.py").unwrap();
        assert!(a < b);
    }
}
