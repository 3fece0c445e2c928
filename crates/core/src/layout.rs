//! Run Output Layout
//!
//! All paths the pipeline writes live under a single working directory and
//! follow a fixed convention. Centralizing them here keeps the orchestrator,
//! test runner, and report generator agreed on where artifacts land, and makes
//! re-runs overwrite the same paths.
//!
//! ```text
//! <work_dir>/
//! ├── extracted_files/              archive contents
//! │   ├── conftest.py               import-path shim for pytest
//! │   └── tests/
//! │       ├── unit/test_<name>.py
//! │       └── integration/test_integration.py
//! ├── outputs/
//! │   ├── context.txt               per-file summaries
//! │   ├── report_unit.txt
//! │   └── report_integration.txt
//! ├── unit_test_coverage.txt        raw captured pytest output
//! └── integration_test_coverage.txt
//! ```

use std::path::{Path, PathBuf};

use crate::error::CoreResult;

/// Name of the directory archives are extracted into.
pub const EXTRACT_DIR: &str = "extracted_files";

/// Name of the directory reports and summaries are written into.
pub const OUTPUTS_DIR: &str = "outputs";

/// Fixed output layout for a run, rooted at a working directory.
#[derive(Debug, Clone)]
pub struct RunLayout {
    work_dir: PathBuf,
}

impl RunLayout {
    /// Create a layout rooted at the given working directory.
    pub fn new(work_dir: impl AsRef<Path>) -> Self {
        Self {
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    /// The working directory the layout is rooted at.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Directory the archive is extracted into.
    pub fn extract_dir(&self) -> PathBuf {
        self.work_dir.join(EXTRACT_DIR)
    }

    /// Directory generated unit tests are written into.
    pub fn unit_tests_dir(&self) -> PathBuf {
        self.extract_dir().join("tests").join("unit")
    }

    /// Directory the generated integration test is written into.
    pub fn integration_tests_dir(&self) -> PathBuf {
        self.extract_dir().join("tests").join("integration")
    }

    /// Path of the generated unit-test file for a source file name.
    pub fn unit_test_path(&self, file_name: &str) -> PathBuf {
        self.unit_tests_dir().join(format!("test_{}", file_name))
    }

    /// Path of the generated integration-test file.
    pub fn integration_test_path(&self) -> PathBuf {
        self.integration_tests_dir().join("test_integration.py")
    }

    /// Path of the pytest import-path shim.
    pub fn conftest_path(&self) -> PathBuf {
        self.extract_dir().join("conftest.py")
    }

    /// Directory summaries and reports are written into.
    pub fn outputs_dir(&self) -> PathBuf {
        self.work_dir.join(OUTPUTS_DIR)
    }

    /// Path of the persisted per-file summaries.
    pub fn context_path(&self) -> PathBuf {
        self.outputs_dir().join("context.txt")
    }

    /// Path of the unit-test business report.
    pub fn unit_report_path(&self) -> PathBuf {
        self.outputs_dir().join("report_unit.txt")
    }

    /// Path of the integration-test business report.
    pub fn integration_report_path(&self) -> PathBuf {
        self.outputs_dir().join("report_integration.txt")
    }

    /// Path of the raw captured unit-test run output.
    pub fn unit_coverage_path(&self) -> PathBuf {
        self.work_dir.join("unit_test_coverage.txt")
    }

    /// Path of the raw captured integration-test run output.
    pub fn integration_coverage_path(&self) -> PathBuf {
        self.work_dir.join("integration_test_coverage.txt")
    }

    /// Create every directory the layout needs.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(self.unit_tests_dir())?;
        std::fs::create_dir_all(self.integration_tests_dir())?;
        std::fs::create_dir_all(self.outputs_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_rooted_at_work_dir() {
        let layout = RunLayout::new("/work");
        assert_eq!(layout.extract_dir(), PathBuf::from("/work/extracted_files"));
        assert_eq!(
            layout.unit_test_path("utils.py"),
            PathBuf::from("/work/extracted_files/tests/unit/test_utils.py")
        );
        assert_eq!(
            layout.integration_test_path(),
            PathBuf::from("/work/extracted_files/tests/integration/test_integration.py")
        );
        assert_eq!(layout.context_path(), PathBuf::from("/work/outputs/context.txt"));
    }

    #[test]
    fn test_ensure_dirs_creates_layout() {
        let temp = tempfile::tempdir().unwrap();
        let layout = RunLayout::new(temp.path());
        layout.ensure_dirs().unwrap();

        assert!(layout.unit_tests_dir().is_dir());
        assert!(layout.integration_tests_dir().is_dir());
        assert!(layout.outputs_dir().is_dir());
    }

    #[test]
    fn test_ensure_dirs_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let layout = RunLayout::new(temp.path());
        layout.ensure_dirs().unwrap();
        layout.ensure_dirs().unwrap();
        assert!(layout.unit_tests_dir().is_dir());
    }
}
