// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type.
///
/// Sampling failures never surface here: a failed sample degrades the report
/// instead of failing the request.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
