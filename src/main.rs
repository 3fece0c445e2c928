//! Testforge CLI
//!
//! Drives the full pipeline: extract the archive, generate summaries and
//! tests, execute the suites under coverage, and produce the business
//! reports.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use testforge::models::RunSummary;
use testforge::services::{PipelineOrchestrator, ReportService};
use testforge_core::RunConfig;
use testforge_llm::{build_provider, ProviderConfig, ProviderKind};
use testforge_pipeline::{TestRunner, TestSuite};

#[derive(Parser, Debug)]
#[command(
    name = "testforge",
    about = "Generate documentation, test suites, and coverage reports for a Python codebase",
    version
)]
struct Args {
    /// Path to the zip archive containing the Python project
    #[arg(value_name = "ARCHIVE")]
    archive: PathBuf,

    /// File names to generate unit tests for (default: all discovered Python files)
    #[arg(long = "unit-tests", value_name = "NAME")]
    unit_tests: Vec<String>,

    /// Model backend: anthropic or openai
    #[arg(long, default_value = "anthropic")]
    backend: String,

    /// Model identifier (default: the backend's default model)
    #[arg(long)]
    model: Option<String>,

    /// Directory the run layout is rooted at
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,

    /// Number of files processed concurrently
    #[arg(long, default_value_t = testforge_core::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Skip installing dependencies from requirements.txt
    #[arg(long)]
    skip_install: bool,

    /// Generate artifacts but skip test execution and reports
    #[arg(long)]
    skip_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let started_at = Utc::now();

    let backend: ProviderKind = args
        .backend
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let mut provider_config = ProviderConfig::from_env(backend);
    if let Some(model) = args.model {
        provider_config.model = model;
    }
    let provider = build_provider(provider_config);
    info!(backend = provider.name(), model = provider.model(), "backend selected");

    let mut run_config = RunConfig::new(&args.work_dir)
        .with_unit_test_files(args.unit_tests)
        .with_concurrency(args.concurrency);
    run_config.skip_install = args.skip_install;
    run_config.skip_run = args.skip_run;

    let orchestrator = PipelineOrchestrator::new(provider.clone(), run_config.clone())
        .context("invalid run configuration")?;
    let output = orchestrator
        .run(&args.archive)
        .await
        .context("generation pipeline failed")?;

    let mut command_outcomes = Vec::new();
    if output.is_empty() {
        info!("no Python files to test; run complete");
    } else if run_config.skip_run {
        info!("skipping test execution (--skip-run)");
    } else {
        let layout = orchestrator.layout().clone();
        let runner = TestRunner::new(layout.clone());
        runner.write_conftest().context("failed to write conftest")?;

        if !run_config.skip_install {
            if let Some(outcome) = runner
                .install_requirements()
                .await
                .context("dependency install failed")?
            {
                command_outcomes.push(outcome);
            }
        }

        let reports = ReportService::new(provider.clone(), layout);

        if !output.unit_tests.is_empty() {
            let outcome = runner
                .run_suite(TestSuite::Unit)
                .await
                .context("unit test run failed")?;
            reports
                .generate_unit_report(&output.unit_tests_corpus(), &outcome.output)
                .await
                .context("unit report generation failed")?;
            command_outcomes.push(outcome);
        }

        if let Some(integration) = &output.integration_test {
            let outcome = runner
                .run_suite(TestSuite::Integration)
                .await
                .context("integration test run failed")?;
            reports
                .generate_integration_report(integration, &outcome.output)
                .await
                .context("integration report generation failed")?;
            command_outcomes.push(outcome);
        }
    }

    let summary = RunSummary {
        backend: provider.name().to_string(),
        model: provider.model().to_string(),
        files_processed: output.files.len(),
        unit_tests_written: output.unit_tests.len(),
        integration_test_written: output.integration_test.is_some(),
        command_outcomes,
        started_at,
        finished_at: Utc::now(),
    };
    info!(
        files = summary.files_processed,
        unit_tests = summary.unit_tests_written,
        integration = summary.integration_test_written,
        "run complete"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
