//! Error types for page query backends

use thiserror::Error;

/// Page query error enumeration
#[derive(Debug, Error, Clone)]
pub enum PageError {
    /// Query could not be executed (malformed input, unsupported operation)
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The automation session is gone (browser closed, transport dropped)
    #[error("Page disconnected: {0}")]
    Disconnected(String),

    /// Query exceeded the backend's own time limit
    #[error("Query timeout: {0}")]
    Timeout(String),
}

impl PageError {
    /// Check if the error is worth retrying at a higher level.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PageError::Timeout(_))
    }
}
