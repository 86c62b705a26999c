//! Error types for outbound channel operations.
//!
//! Covers the ways a downstream provider call can fail: transport-level
//! network errors, timeouts, non-success provider responses, and client
//! misconfiguration. Channel errors are captured per channel and logged;
//! they never propagate past the dispatch coordinator.

use thiserror::Error;

/// Result type alias for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;

/// Failure of one downstream channel call.
#[derive(Debug, Clone, Error)]
pub enum ChannelError {
    /// Network-level connectivity failure.
    #[error("network connection failed: {message}")]
    Network {
        /// Error message describing the network failure
        message: String,
    },

    /// HTTP request timeout exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out
        timeout_seconds: u64,
    },

    /// Provider returned a non-success status.
    #[error("provider rejected request: HTTP {status_code}")]
    Provider {
        /// HTTP status code returned by the provider
        status_code: u16,
        /// Response body content, kept for server-side logs
        body: String,
    },

    /// Invalid client configuration.
    #[error("invalid channel configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl ChannelError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates a provider rejection from an HTTP response.
    pub fn provider(status_code: u16, body: impl Into<String>) -> Self {
        Self::Provider { status_code, body: body.into() }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Returns the provider status code, when the provider answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Provider { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
