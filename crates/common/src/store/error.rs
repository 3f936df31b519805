//! Error types for the object-store adapter.

use std::time::Duration;

/// Errors that can occur talking to the flat object store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// S3 transport or protocol error
    #[error("s3 request failed: {0}")]
    S3(#[from] s3::error::S3Error),

    /// Server-side copy came back with a non-success status
    #[error("copy {from} -> {to} failed with HTTP {status}")]
    CopyFailed { from: String, to: String, status: u16 },

    /// Object expected to exist was not there
    #[error("object not found: {0}")]
    NotFound(String),

    /// A single store call exceeded the configured deadline
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid backend configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Per-key outcome of a batch mutation that did not fully succeed.
#[derive(Debug, Clone)]
pub struct KeyFailure {
    pub key: String,
    pub reason: String,
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
