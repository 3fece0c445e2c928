//! Testforge Pipeline
//!
//! The filesystem and subprocess half of the pipeline: archive extraction,
//! encoded source reading, fenced code-block extraction, and
//! coverage-instrumented test execution.
//!
//! - `archive` - zip extraction and Python source discovery
//! - `reader` - encoding-fallback file reading
//! - `extract` - code-fence body extraction from model responses
//! - `runner` - pytest/pip subprocess execution with captured output

pub mod archive;
pub mod extract;
pub mod reader;
pub mod runner;

// Re-export the pipeline surface
pub use archive::{discover_python_files, extract_archive, find_requirements};
pub use extract::extract_code_block;
pub use reader::read_source;
pub use runner::{CommandOutcome, RunStatus, RunnerConfig, TestRunner, TestSuite};
