//! Error types for the API client crate.

use skincare_core::errors::{Error as CoreError, ProblemDetails, RemoteError};
use thiserror::Error;

/// Result type alias for API client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;

/// Errors that can occur while talking to the skincare API.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// Transport failure: connect, timeout, or reading the body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Problem-details response from the server
    #[error("API error ({status}): {}", problem.detail)]
    Api { status: u16, problem: ProblemDetails },

    /// Response that is neither a valid body nor a problem
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing or malformed credentials
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Client could not be constructed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiClientError {
    pub fn api(status: u16, problem: ProblemDetails) -> Self {
        Self::Api { status, problem }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// HTTP status of a problem response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ApiClientError> for RemoteError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Api { status, problem } => RemoteError::api(status, problem),
            ApiClientError::Http(e) if e.is_decode() => RemoteError::unknown(e.to_string()),
            ApiClientError::Http(e) => RemoteError::network(e.to_string()),
            other => RemoteError::unknown(other.to_string()),
        }
    }
}

impl From<ApiClientError> for CoreError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Auth(message) => CoreError::Auth(message),
            ApiClientError::Config(message) => CoreError::Config(message),
            other => CoreError::Remote(other.into()),
        }
    }
}
