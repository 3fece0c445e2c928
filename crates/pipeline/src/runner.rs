//! Test Execution
//!
//! Runs the generated unit and integration suites under pytest with coverage
//! instrumentation, each as a separate subprocess, capturing combined output
//! to the run's coverage text files. Also installs project dependencies from
//! a discovered `requirements.txt` before the suites run.
//!
//! The Python import path is passed to each child process explicitly via its
//! environment; nothing in the parent process is mutated.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{info, warn};

use testforge_core::{CoreResult, RunLayout};

use crate::archive::find_requirements;

/// Which generated suite a runner invocation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestSuite {
    /// `tests/unit`
    Unit,
    /// `tests/integration`
    Integration,
}

impl std::fmt::Display for TestSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestSuite::Unit => write!(f, "unit"),
            TestSuite::Integration => write!(f, "integration"),
        }
    }
}

/// Outcome status of a runner invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Command exited zero
    Passed,
    /// Command exited nonzero (test failures land here; the report prompt
    /// sees the details in the captured output)
    Failed,
    /// Command binary not found in PATH
    Skipped,
    /// Command could not be executed or timed out
    Error,
}

/// Result of one runner invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutcome {
    /// Suite the invocation targeted, if any (`None` for pip install)
    pub suite: Option<TestSuite>,
    /// Rendered command line
    pub command: String,
    /// Outcome status
    pub status: RunStatus,
    /// Exit code, when the process ran to completion
    pub exit_code: Option<i32>,
    /// Captured stdout + stderr, truncated at the configured cap
    pub output: String,
    /// Wall-clock duration
    pub duration_ms: u64,
    /// When the invocation started
    pub started_at: DateTime<Utc>,
}

/// Test runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Maximum output size to capture (bytes)
    pub max_output_size: usize,
    /// Per-command timeout
    pub timeout_secs: u64,
    /// Python interpreter used for pip
    pub python_command: String,
    /// pytest binary
    pub pytest_command: String,
    /// Extra environment variables for every child process
    pub env: HashMap<String, String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_output_size: 1024 * 1024, // 1MB
            timeout_secs: 600,
            python_command: "python3".to_string(),
            pytest_command: "pytest".to_string(),
            env: HashMap::new(),
        }
    }
}

/// Executes the generated suites and captures their coverage output.
pub struct TestRunner {
    layout: RunLayout,
    config: RunnerConfig,
}

impl TestRunner {
    /// Create a runner over the given layout.
    pub fn new(layout: RunLayout) -> Self {
        Self {
            layout,
            config: RunnerConfig::default(),
        }
    }

    /// Set configuration via builder pattern.
    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Write the pytest import-path shim into the extraction root so the
    /// generated tests can import project modules.
    pub fn write_conftest(&self) -> CoreResult<()> {
        let shim = format!(
            "import sys\nsys.path.insert(0, '{}')\n",
            self.layout.work_dir().display()
        );
        std::fs::write(self.layout.conftest_path(), shim)?;
        Ok(())
    }

    /// Install project dependencies from a discovered `requirements.txt`.
    ///
    /// Returns `None` when the extracted project carries no requirements
    /// file; that is not an error.
    pub async fn install_requirements(&self) -> CoreResult<Option<CommandOutcome>> {
        let Some(requirements) = find_requirements(&self.layout.extract_dir()) else {
            info!("no requirements.txt found, skipping dependency install");
            return Ok(None);
        };

        let args = vec![
            "-m".to_string(),
            "pip".to_string(),
            "install".to_string(),
            "-r".to_string(),
            requirements.display().to_string(),
        ];
        let outcome = self.execute(&self.config.python_command, &args, None).await;
        Ok(Some(outcome))
    }

    /// Run one generated suite under pytest with coverage, writing the
    /// captured output to the suite's coverage text file and returning the
    /// outcome with the same text in memory.
    pub async fn run_suite(&self, suite: TestSuite) -> CoreResult<CommandOutcome> {
        let tests_dir = match suite {
            TestSuite::Unit => self.layout.unit_tests_dir(),
            TestSuite::Integration => self.layout.integration_tests_dir(),
        };
        let report_path = self.report_path(suite);

        let args = vec![
            format!("--cov={}", self.layout.extract_dir().display()),
            "--cov-report=term-missing".to_string(),
            tests_dir.display().to_string(),
            "-vv".to_string(),
            "-r".to_string(),
            "a".to_string(),
            "--disable-warnings".to_string(),
        ];

        let outcome = self
            .execute(&self.config.pytest_command, &args, Some(suite))
            .await;

        std::fs::write(&report_path, &outcome.output)?;
        info!(
            suite = %suite,
            status = ?outcome.status,
            report = %report_path.display(),
            "test suite finished"
        );
        Ok(outcome)
    }

    /// Coverage text file for a suite.
    pub fn report_path(&self, suite: TestSuite) -> PathBuf {
        match suite {
            TestSuite::Unit => self.layout.unit_coverage_path(),
            TestSuite::Integration => self.layout.integration_coverage_path(),
        }
    }

    /// Execute a command, capturing combined output.
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        suite: Option<TestSuite>,
    ) -> CommandOutcome {
        let rendered = format!("{} {}", program, args.join(" "));
        let started_at = Utc::now();
        let start = Instant::now();

        if !self.command_exists(program).await {
            warn!(command = program, "command not found in PATH, skipping");
            return CommandOutcome {
                suite,
                command: rendered,
                status: RunStatus::Skipped,
                exit_code: None,
                output: format!("Command '{}' not found in PATH", program),
                duration_ms: 0,
                started_at,
            };
        }

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(self.layout.work_dir())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Import path for the child only; the parent environment is
            // never touched.
            .env("PYTHONPATH", self.layout.extract_dir());

        for (key, value) in &self.config.env {
            cmd.env(key, value);
        }

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        match timeout(timeout_duration, cmd.output()).await {
            Ok(Ok(output)) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                let mut combined = self.truncate_output(&output.stdout);
                let stderr = self.truncate_output(&output.stderr);
                if !stderr.is_empty() {
                    if !combined.is_empty() {
                        combined.push('\n');
                    }
                    combined.push_str(&stderr);
                }

                let status = if output.status.success() {
                    RunStatus::Passed
                } else {
                    RunStatus::Failed
                };
                CommandOutcome {
                    suite,
                    command: rendered,
                    status,
                    exit_code: output.status.code(),
                    output: combined,
                    duration_ms,
                    started_at,
                }
            }
            Ok(Err(e)) => CommandOutcome {
                suite,
                command: rendered,
                status: RunStatus::Error,
                exit_code: None,
                output: format!("Failed to execute command: {}", e),
                duration_ms: start.elapsed().as_millis() as u64,
                started_at,
            },
            Err(_) => CommandOutcome {
                suite,
                command: rendered,
                status: RunStatus::Error,
                exit_code: None,
                output: format!(
                    "Command timed out after {} seconds",
                    self.config.timeout_secs
                ),
                duration_ms: start.elapsed().as_millis() as u64,
                started_at,
            },
        }
    }

    /// Check if a command exists in PATH
    async fn command_exists(&self, command: &str) -> bool {
        #[cfg(windows)]
        {
            let check = Command::new("where")
                .arg(command)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;
            check.map(|s| s.success()).unwrap_or(false)
        }

        #[cfg(not(windows))]
        {
            let check = Command::new("which")
                .arg(command)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;
            check.map(|s| s.success()).unwrap_or(false)
        }
    }

    /// Truncate output to max size
    fn truncate_output(&self, bytes: &[u8]) -> String {
        let s = String::from_utf8_lossy(bytes);
        if s.len() > self.config.max_output_size {
            let truncated = &s[..self.config.max_output_size];
            format!("{}\n... (output truncated)", truncated)
        } else {
            s.into_owned()
        }
    }
}
