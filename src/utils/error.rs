//! Error handling for ticketml
//!
//! This module provides a unified error type and result type for
//! compilation, layout and configuration. Device emission failures have
//! their own type in [`crate::features::device`] because they never
//! propagate to the caller.

use thiserror::Error;

/// Render error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The compiler was given no node types to recognize
    #[error("Compiler init failed: node type vocabulary is empty")]
    EmptyVocabulary,
    /// Invalid input
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
    /// Configuration could not be read or parsed
    #[error("Config error: {message}")]
    Config { message: String },
    /// IO error (for file operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

// Convenience constructors for errors
impl RenderError {
    pub fn invalid(message: impl Into<String>) -> Self {
        RenderError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        RenderError::Config {
            message: message.into(),
        }
    }
}
