//! Full Pipeline Integration Tests
//!
//! Run the orchestrator end-to-end over real zip archives with a scripted
//! provider and check the artifact layout it leaves behind.

use std::path::PathBuf;

use testforge::services::PipelineOrchestrator;
use testforge_core::{RunConfig, RunLayout};

use crate::common::{build_archive, ScriptedProvider};

fn orchestrator_in(work_dir: &std::path::Path, selection: Vec<String>) -> PipelineOrchestrator {
    let config = RunConfig::new(work_dir).with_unit_test_files(selection);
    PipelineOrchestrator::new(ScriptedProvider::new(), config).unwrap()
}

/// Relative paths of every file under the work dir, sorted.
fn artifact_paths(work_dir: &std::path::Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = walkdir(work_dir)
        .into_iter()
        .map(|p| p.strip_prefix(work_dir).unwrap().to_path_buf())
        .collect();
    paths.sort();
    paths
}

fn walkdir(dir: &std::path::Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                out.extend(walkdir(&path));
            } else {
                out.push(path);
            }
        }
    }
    out
}

#[tokio::test]
async fn test_two_file_project_end_to_end() {
    let temp = tempfile::tempdir().unwrap();
    let archive = build_archive(
        temp.path(),
        "project.zip",
        &[
            ("project/a.py", "def add(x, y):\n    return x + y\n"),
            ("project/b.py", "def sub(x, y):\n    return x - y\n"),
        ],
    );

    let work_dir = temp.path().join("run");
    std::fs::create_dir_all(&work_dir).unwrap();
    let orchestrator = orchestrator_in(&work_dir, vec!["a.py".to_string()]);
    let output = orchestrator.run(&archive).await.unwrap();

    // One summary per file
    assert_eq!(output.files.len(), 2);
    // Unit tests only for the selected file
    assert_eq!(output.unit_tests.len(), 1);
    let layout = RunLayout::new(&work_dir);
    assert!(layout.unit_test_path("a.py").exists());
    assert!(!layout.unit_test_path("b.py").exists());
    // Exactly one integration artifact
    assert!(output.integration_test.is_some());
    assert!(layout.integration_test_path().exists());

    // Summaries persisted for both files
    let context = std::fs::read_to_string(layout.context_path()).unwrap();
    assert!(context.contains("a.py"));
    assert!(context.contains("b.py"));
    assert!(context.contains("Summarized business logic."));
}

#[tokio::test]
async fn test_non_python_archive_writes_no_test_artifacts() {
    let temp = tempfile::tempdir().unwrap();
    let archive = build_archive(
        temp.path(),
        "docs.zip",
        &[("readme.md", "# docs"), ("data.json", "{}")],
    );

    let work_dir = temp.path().join("run");
    std::fs::create_dir_all(&work_dir).unwrap();
    let orchestrator = orchestrator_in(&work_dir, vec![]);
    let output = orchestrator.run(&archive).await.unwrap();

    assert!(output.is_empty());
    let layout = RunLayout::new(&work_dir);
    assert!(!layout.integration_test_path().exists());
    let unit_files: Vec<_> = std::fs::read_dir(layout.unit_tests_dir())
        .map(|d| d.flatten().collect())
        .unwrap_or_default();
    assert!(unit_files.is_empty());
}

#[tokio::test]
async fn test_macos_metadata_entries_are_skipped() {
    let temp = tempfile::tempdir().unwrap();
    let archive = build_archive(
        temp.path(),
        "mac.zip",
        &[
            ("project/app.py", "value = 42\n"),
            ("__MACOSX/project/._app.py", "\x00\x01resource fork"),
        ],
    );

    let work_dir = temp.path().join("run");
    std::fs::create_dir_all(&work_dir).unwrap();
    let orchestrator = orchestrator_in(&work_dir, vec![]);
    let output = orchestrator.run(&archive).await.unwrap();

    assert_eq!(output.files.len(), 1);
    assert!(output.files.keys().next().unwrap().ends_with("project/app.py"));
}

#[tokio::test]
async fn test_generated_artifacts_carry_path_headers() {
    let temp = tempfile::tempdir().unwrap();
    let archive = build_archive(
        temp.path(),
        "project.zip",
        &[("pkg/util.py", "def f():\n    return 1\n")],
    );

    let work_dir = temp.path().join("run");
    std::fs::create_dir_all(&work_dir).unwrap();
    let orchestrator = orchestrator_in(&work_dir, vec![]);
    orchestrator.run(&archive).await.unwrap();

    let layout = RunLayout::new(&work_dir);
    let unit = std::fs::read_to_string(layout.unit_test_path("util.py")).unwrap();
    assert!(unit.starts_with("import sys\nsys.path.insert(0, '"));
    assert!(unit.contains("def test_unit()"));

    let integration = std::fs::read_to_string(layout.integration_test_path()).unwrap();
    assert!(integration.starts_with("import sys\nsys.path.insert(0, '"));
    assert!(integration.contains("def test_integration()"));
}

#[tokio::test]
async fn test_rerun_produces_identical_layout() {
    let temp = tempfile::tempdir().unwrap();
    let archive = build_archive(
        temp.path(),
        "project.zip",
        &[
            ("project/a.py", "x = 1\n"),
            ("project/b.py", "y = 2\n"),
        ],
    );

    let work_dir = temp.path().join("run");
    std::fs::create_dir_all(&work_dir).unwrap();

    let orchestrator = orchestrator_in(&work_dir, vec![]);
    orchestrator.run(&archive).await.unwrap();
    let first = artifact_paths(&work_dir);

    // Second run over the same archive into the same work dir
    let orchestrator = orchestrator_in(&work_dir, vec![]);
    let output = orchestrator.run(&archive).await.unwrap();
    let second = artifact_paths(&work_dir);

    assert_eq!(first, second);
    // Re-discovery must not pick up the generated tests as sources
    assert_eq!(output.files.len(), 2);
}
