//! Failure-Path Integration Tests
//!
//! A model-call failure is not locally recovered: it propagates and aborts
//! the run before any test artifact is written.

use testforge::services::PipelineOrchestrator;
use testforge_core::{RunConfig, RunLayout};

use crate::common::{build_archive, FailingProvider};

#[tokio::test]
async fn test_model_failure_aborts_before_artifacts() {
    let temp = tempfile::tempdir().unwrap();
    let archive = build_archive(
        temp.path(),
        "project.zip",
        &[("app.py", "x = 1\n"), ("lib.py", "y = 2\n")],
    );

    let work_dir = temp.path().join("run");
    std::fs::create_dir_all(&work_dir).unwrap();
    let config = RunConfig::new(&work_dir);
    let orchestrator = PipelineOrchestrator::new(FailingProvider::new(), config).unwrap();

    let result = orchestrator.run(&archive).await;
    assert!(result.is_err());

    let layout = RunLayout::new(&work_dir);
    assert!(!layout.integration_test_path().exists());
    let unit_files: Vec<_> = std::fs::read_dir(layout.unit_tests_dir())
        .map(|d| d.flatten().collect())
        .unwrap_or_default();
    assert!(unit_files.is_empty());
}

#[tokio::test]
async fn test_unreadable_archive_aborts() {
    let temp = tempfile::tempdir().unwrap();
    let bogus = temp.path().join("broken.zip");
    std::fs::write(&bogus, "definitely not a zip").unwrap();

    let work_dir = temp.path().join("run");
    std::fs::create_dir_all(&work_dir).unwrap();
    let config = RunConfig::new(&work_dir);
    let orchestrator = PipelineOrchestrator::new(FailingProvider::new(), config).unwrap();

    let result = orchestrator.run(&bogus).await;
    assert!(result.is_err());
    // Nothing was laid out
    assert!(!RunLayout::new(&work_dir).integration_test_path().exists());
}
