//! Error types for the call flows process
//!
//! Bootstrap and configuration failures; service errors are wrapped as-is.

use callflows_core::CallFlowError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration file could not be parsed
    #[error("Configuration file error: {0}")]
    ConfigFileError(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by a service
    #[error(transparent)]
    Service(#[from] CallFlowError),
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;
