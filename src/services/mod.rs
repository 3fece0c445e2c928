//! Application Services
//!
//! - `generation` - summary and test-generation model calls
//! - `orchestrator` - per-file fan-out, artifact writing, summary persistence
//! - `report` - business-level report generation from captured run output

pub mod generation;
pub mod orchestrator;
pub mod report;

pub use generation::GenerationService;
pub use orchestrator::PipelineOrchestrator;
pub use report::ReportService;
