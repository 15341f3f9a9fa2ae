//! Error types for content access.
//!
//! Configuration problems are detected when the client descriptor is built.
//! Everything the backend or the transport reports is surfaced unmodified to
//! the caller; the core never retries or swallows a failure.

use thiserror::Error;

/// Errors produced by the content access layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid credentials, detected at configuration time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never produced a usable HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with an error status.
    #[error("backend error {status} ({code}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Backend error identifier (e.g. `InvalidQuery`, `AccessTokenInvalid`).
        code: String,
        /// Human-readable message from the backend.
        message: String,
        /// Request id reported by the backend, if any.
        request_id: Option<String>,
    },

    /// The response body did not have the expected collection shape.
    #[error("failed to decode backend response: {0}")]
    Decode(String),

    /// Output serialization (sitemap XML) failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Whether this error originated at the backend boundary
    /// (transport failure, error status, or undecodable body).
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Api { .. } | Self::Decode(_))
    }
}

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
