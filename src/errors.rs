//! Shared error types for the coefficient engine.
//!
//! Only pipeline failures live here. A pair of variables that cannot be
//! compared (for instance because one of them is constant) is not an error:
//! its coefficient is reported as `NaN`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for clustermatch operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any computation started
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed matrix file
    #[error("Parse error in {}:{line}: {message}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// Array shape mismatch while assembling outputs
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML decoding errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a parse error with location
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's data rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Parse { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
