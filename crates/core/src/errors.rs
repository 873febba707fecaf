//! Core error types for the skincare client.
//!
//! Transport-specific failures (reqwest, JSON decoding) are converted into
//! [`RemoteError`] by the API client so that this crate stays independent of
//! any HTTP stack.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the client core.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Remote call failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid configuration value: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Shorthand for an `InvalidInput` validation failure.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }

    /// Returns the HTTP status when the server answered with a problem.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote(RemoteError::Api { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// True if the failure is a 401 from the server.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Failures of a call against the remote service.
///
/// `Api` means the server answered with a structured problem, `Network`
/// means the request never produced a response, and `Unknown` covers
/// everything else, including malformed error bodies.
#[derive(Error, Debug, Clone)]
pub enum RemoteError {
    #[error("API error ({status}): {}", problem.detail)]
    Api { status: u16, problem: ProblemDetails },

    #[error("Network error occurred: {0}")]
    Network(String),

    #[error("An unexpected error occurred: {0}")]
    Unknown(String),
}

impl RemoteError {
    pub fn api(status: u16, problem: ProblemDetails) -> Self {
        Self::Api { status, problem }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown(message.into())
    }
}

/// Problem-details body returned by the server on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldProblem>>,
}

impl ProblemDetails {
    /// The message shown to the user: the first field-level message if the
    /// server sent any, the detail string otherwise.
    pub fn display_message(&self) -> &str {
        self.errors
            .as_ref()
            .and_then(|errors| errors.first())
            .map(|e| e.message.as_str())
            .unwrap_or(&self.detail)
    }
}

/// Field-level entry of a [`ProblemDetails`] body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProblem {
    pub field: String,
    pub message: String,
}

/// Local validation failures. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("{field}: {message}")]
    Field { field: String, message: String },
}

impl ValidationError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message without the field prefix, for display next to the field.
    pub fn message(&self) -> String {
        match self {
            ValidationError::InvalidInput(msg) => msg.clone(),
            ValidationError::MissingField(field) => format!("{} is required", field),
            ValidationError::Field { message, .. } => message.clone(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(errors: Option<Vec<FieldProblem>>) -> ProblemDetails {
        ProblemDetails {
            title: "Unprocessable Entity".to_string(),
            status: 422,
            detail: "Request validation failed".to_string(),
            instance: "/api/v1/products".to_string(),
            errors,
        }
    }

    #[test]
    fn test_display_message_prefers_first_field_error() {
        let p = problem(Some(vec![
            FieldProblem {
                field: "name".to_string(),
                message: "Name must not be empty".to_string(),
            },
            FieldProblem {
                field: "brand".to_string(),
                message: "Brand too long".to_string(),
            },
        ]));
        assert_eq!(p.display_message(), "Name must not be empty");
    }

    #[test]
    fn test_display_message_falls_back_to_detail() {
        assert_eq!(problem(None).display_message(), "Request validation failed");
        assert_eq!(
            problem(Some(vec![])).display_message(),
            "Request validation failed"
        );
    }

    #[test]
    fn test_is_unauthorized() {
        let mut p = problem(None);
        p.status = 401;
        let err = Error::from(RemoteError::api(401, p));
        assert!(err.is_unauthorized());
        assert!(!Error::from(RemoteError::network("offline")).is_unauthorized());
    }
}
