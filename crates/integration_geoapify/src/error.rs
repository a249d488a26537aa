//! Map-matching error types

use thiserror::Error;

/// Errors that can occur during a map-matching request
#[derive(Debug, Error)]
pub enum GeoapifyError {
    /// Connection to the matching service failed
    #[error("Map-matching connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request returned a failure status
    #[error("Map-matching request failed: {0}")]
    RequestFailed(String),

    /// Failed to decode the matching response
    #[error("Map-matching parse error: {0}")]
    ParseError(String),

    /// Response carried no usable geometry
    #[error("Map-matching returned no geometry")]
    EmptyGeometry,

    /// Fewer than two waypoints were supplied
    #[error("Map-matching needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),

    /// Request timeout
    #[error("Map-matching request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}
