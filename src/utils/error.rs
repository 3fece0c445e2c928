//! Error Handling
//!
//! Unified error type for the application. Wraps the workspace crates'
//! errors so services can use `?` across component boundaries.

use thiserror::Error;

use testforge_core::CoreError;
use testforge_llm::LlmError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Errors from the core crate (I/O, archive, decode, command)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Errors from a model backend
    #[error("Model error: {0}")]
    Llm(#[from] LlmError),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::config("no backend selected");
        assert_eq!(err.to_string(), "Configuration error: no backend selected");
    }

    #[test]
    fn test_core_error_conversion() {
        let core = CoreError::validation("empty path");
        let app: AppError = core.into();
        assert!(app.to_string().contains("empty path"));
    }

    #[test]
    fn test_llm_error_conversion() {
        let llm = LlmError::RateLimited {
            message: "slow down".to_string(),
        };
        let app: AppError = llm.into();
        assert!(matches!(app, AppError::Llm(_)));
    }
}
