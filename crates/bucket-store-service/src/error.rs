//! Error types for the service layer.

use bucket_store_core::{ErrorKind, SanitizedError};
use thiserror::Error;

/// Errors that can occur in the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Store error, already sanitized by the engine.
    #[error("store error: {0}")]
    Store(#[from] SanitizedError),

    /// Configuration that no engine can run with.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ServiceError {
    /// The public error classification, for store errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ServiceError::Store(e) => Some(e.kind()),
            ServiceError::InvalidConfig(_) => None,
        }
    }

    /// HTTP status code the host should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Store(e) => e.status_code(),
            ServiceError::InvalidConfig(_) => 500,
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
