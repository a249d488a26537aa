//! Tranzy client error types

use thiserror::Error;

/// Errors that can occur when talking to the opendata API
#[derive(Debug, Error)]
pub enum TranzyError {
    /// Connection to the opendata service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request returned a failure status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to decode a response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TranzyError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
