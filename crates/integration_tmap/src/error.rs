//! TMAP error types

use thiserror::Error;

/// Errors that can occur while talking to the TMAP API
#[derive(Debug, Error)]
pub enum TmapError {
    /// Connection to the TMAP service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// TMAP answered with an unexpected HTTP status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from TMAP
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The request could not be built from the given parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl TmapError {
    /// Returns true if repeating the request could succeed
    ///
    /// Classification only; the client itself never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }

    /// Map a transport error, keeping timeouts distinguishable
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}
