//! Integration Tests Module
//!
//! End-to-end tests for the generation pipeline. All model calls go through
//! scripted provider doubles; archives are built on the fly into temporary
//! directories so every test is isolated.

// Shared helpers: archive builders and provider doubles
mod common;

// Full pipeline runs over real zip archives
mod pipeline_test;

// Abort and failure-path behavior
mod failure_test;
