//! Testforge Core
//!
//! Foundational error types, run configuration, and the fixed output layout
//! for the Testforge workspace. This crate has zero dependencies on
//! application-level code (CLI, LLM providers, test execution).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `config` - Per-run configuration (`RunConfig`)
//! - `layout` - Fixed artifact layout under the working directory (`RunLayout`)

pub mod config;
pub mod error;
pub mod layout;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Run Configuration ──────────────────────────────────────────────────
pub use config::{RunConfig, DEFAULT_CONCURRENCY};

// ── Output Layout ──────────────────────────────────────────────────────
pub use layout::{RunLayout, EXTRACT_DIR, OUTPUTS_DIR};
