//! Error taxonomy for ForceWeaver API calls.
//!
//! Every variant carries the full user-facing message, including remediation
//! text, so callers (and AI agents relaying the message verbatim) know why the
//! call failed and where to fix it.

use thiserror::Error;

/// Main error type for API calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, invalid, or expired API key (HTTP 401, or a local precondition
    /// failure before any network call is made).
    #[error("{0}")]
    AuthenticationFailed(String),

    /// The subscription does not include the requested feature (HTTP 403).
    #[error("{0}")]
    AccessDenied(String),

    /// Usage limits exceeded (HTTP 429).
    #[error("{0}")]
    RateLimited(String),

    /// The target Salesforce org is not registered (HTTP 404).
    #[error("{0}")]
    NotFound(String),

    /// The service reported a failure (non-2xx status, or a 200 body without a
    /// usable payload).
    #[error("{0}")]
    ServiceError(String),

    /// Transport-level failure (DNS, connect, TLS, broken stream).
    #[error("Connection error: {0}")]
    ConnectionFailed(String),

    /// The request exceeded the overall per-request timeout.
    #[error("Request timeout - the health check took too long to complete")]
    Timeout,

    /// Anything not anticipated by the adapter.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
