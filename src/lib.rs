//! Testforge
//!
//! Automated documentation and test-suite generation for Python codebases.
//! Given a zip archive, the pipeline extracts it, summarizes each source
//! file's business logic via a model backend, generates pytest unit and
//! integration suites, executes them under coverage, and produces
//! business-level reports from the captured output.
//!
//! The heavy lifting is delegated to the model; this crate is the plumbing:
//! walking files, assembling prompts, shelling out to pytest, and writing
//! artifacts into a fixed layout.

pub mod models;
pub mod prompts;
pub mod services;
pub mod utils;

pub use models::{FileArtifacts, GeneratedTest, PipelineOutput, RunSummary};
pub use services::{GenerationService, PipelineOrchestrator, ReportService};
pub use utils::{AppError, AppResult};
