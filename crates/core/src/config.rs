//! Run Configuration
//!
//! Explicit configuration for a single pipeline run. Everything the pipeline
//! needs (working directory, unit-test selection, concurrency bounds) is
//! carried here instead of process-global state, so a run is fully described
//! by its `RunConfig` value.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Default number of files processed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Directory the run layout is rooted at
    pub work_dir: PathBuf,
    /// File names (not paths) selected for unit-test generation.
    /// Empty means every discovered Python file.
    pub unit_test_files: Vec<String>,
    /// Upper bound on files processed concurrently; also bounds in-flight
    /// model calls so upstream quotas are respected
    pub concurrency: usize,
    /// Skip the `pip install -r requirements.txt` step
    pub skip_install: bool,
    /// Generate artifacts but do not execute the test suites
    pub skip_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            unit_test_files: Vec::new(),
            concurrency: DEFAULT_CONCURRENCY,
            skip_install: false,
            skip_run: false,
        }
    }
}

impl RunConfig {
    /// Create a config rooted at the given working directory.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Default::default()
        }
    }

    /// Set the unit-test selection via builder pattern.
    pub fn with_unit_test_files(mut self, files: Vec<String>) -> Self {
        self.unit_test_files = files;
        self
    }

    /// Set the concurrency bound via builder pattern.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Whether unit tests should be generated for the given file name.
    ///
    /// An empty selection selects everything, matching the CLI default of
    /// "all discovered Python files".
    pub fn selects_for_unit_tests(&self, file_name: &str) -> bool {
        self.unit_test_files.is_empty()
            || self.unit_test_files.iter().any(|f| f == file_name)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> CoreResult<()> {
        if self.concurrency == 0 {
            return Err(CoreError::validation("concurrency must be at least 1"));
        }
        Ok(())
    }
}
