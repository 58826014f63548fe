//! Error types for stormline.
//!
//! Two taxonomies, matching the two external services: [`ApiError`] for the
//! Livestorm REST API and [`AgentError`] for the completion service and the
//! agent machinery around it. Both are plain data — no variant wraps a
//! transport-library error type, so callers never depend on `reqwest` or
//! SDK error types.

use thiserror::Error;

/// Errors from the Livestorm API client.
///
/// Transport failures and non-success HTTP statuses are both normalized
/// into [`ApiError::Request`]; the client never propagates a raw
/// `reqwest::Error`. The status code is carried when the server produced
/// one (absent for connect/timeout failures).
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The HTTP request failed or returned a non-success status.
    #[error("{message}")]
    Request {
        /// Human-readable failure description.
        message: String,
        /// HTTP status code, when one was received.
        status: Option<u16>,
    },

    /// The response body was not valid JSON.
    #[error("invalid response body: {message}")]
    Decode {
        /// Parse failure description.
        message: String,
    },

    /// The client could not be constructed (bad base URL, TLS setup).
    #[error("client construction failed: {message}")]
    Build {
        /// Construction failure description.
        message: String,
    },
}

impl ApiError {
    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }
}

/// Errors from the agent layer: configuration, completion service calls,
/// streaming, and tool execution.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    /// No API key was configured for the named service.
    #[error("no {service} API key configured")]
    ApiKeyMissing {
        /// Service the key is for (`"completion"` or `"livestorm"`).
        service: &'static str,
    },

    /// The configured provider name is not supported.
    #[error("unsupported provider: {name}")]
    UnsupportedProvider {
        /// The unrecognized provider name.
        name: String,
    },

    /// A completion service request failed.
    #[error("completion request failed: {message}")]
    ApiRequest {
        /// Failure description from the SDK or transport.
        message: String,
        /// HTTP status code, when available.
        status: Option<u16>,
    },

    /// A streaming connection failed to open or broke mid-stream.
    #[error("streaming failed: {message}")]
    Stream {
        /// Failure description.
        message: String,
    },

    /// A tool call could not be executed.
    #[error("tool '{name}' failed: {message}")]
    ToolExecution {
        /// Name of the tool that failed.
        name: String,
        /// Failure description.
        message: String,
    },

    /// Orchestration-level failure (bad input, empty history).
    #[error("{message}")]
    Orchestration {
        /// Failure description.
        message: String,
    },
}
