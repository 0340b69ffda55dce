//! Core Errors
//!
//! Failures surfaced by the REST ports and the key-value storage.

use thiserror::Error;

/// Common result type for remote operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Status used when the request never produced an HTTP response
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// A failed remote call: HTTP status plus a user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Network, CORS or decoding failure (no usable response)
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(TRANSPORT_FAILURE_STATUS, message)
    }
}

/// Browser storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("invalid stored value: {0}")]
    Corrupt(#[from] serde_json::Error),
}
