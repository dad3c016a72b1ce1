//! Error types for the upload submitter.
//!
//! Covers every failure a submission can run into: bad configuration,
//! unreadable local files, transport problems, and responses the client
//! cannot interpret.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for submitter operations.
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Error type for upload submissions.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Configuration error (invalid base URL, empty path, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Validation error on caller-supplied input.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
        /// The parameter that caused the error.
        param: Option<String>,
    },

    /// Local file could not be read or written.
    #[error("I/O error: {message}")]
    Io {
        /// Error message.
        message: String,
    },

    /// Network/connection error.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// Request timed out.
    #[error("Request timeout after {timeout:?}")]
    Timeout {
        /// Configured timeout.
        timeout: Duration,
    },

    /// Response body was not valid JSON.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// Server returned a non-success status without a usable body.
    #[error("Server error (HTTP {status_code}): {message}")]
    Server {
        /// HTTP status code.
        status_code: u16,
        /// Error message.
        message: String,
    },

    /// JSON response carried neither `error` nor `download`.
    #[error("Unrecognized response (HTTP {status_code})")]
    UnrecognizedResponse {
        /// HTTP status code.
        status_code: u16,
        /// Raw response body.
        body: String,
    },
}

impl SubmitError {
    /// Creates a validation error with parameter.
    pub fn validation_param(message: impl Into<String>, param: impl Into<String>) -> Self {
        SubmitError::Validation {
            message: message.into(),
            param: Some(param.into()),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        SubmitError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a server error.
    pub fn server(status_code: u16, message: impl Into<String>) -> Self {
        SubmitError::Server {
            status_code,
            message: message.into(),
        }
    }

    /// Short description shown in the status region after the `Error: ` label.
    pub fn status_message(&self) -> String {
        match self {
            SubmitError::Network { .. } => "could not reach the server".to_string(),
            SubmitError::Timeout { .. } => "the server took too long to respond".to_string(),
            SubmitError::Serialization { .. } => "the server sent an unreadable response".to_string(),
            SubmitError::UnrecognizedResponse { .. } => {
                "the server sent an unexpected response".to_string()
            }
            SubmitError::Server { status_code, .. } => {
                format!("the server failed with HTTP {}", status_code)
            }
            SubmitError::Configuration { message }
            | SubmitError::Validation { message, .. }
            | SubmitError::Io { message } => message.clone(),
        }
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for SubmitError {
    fn from(err: url::ParseError) -> Self {
        SubmitError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

impl From<std::io::Error> for SubmitError {
    fn from(err: std::io::Error) -> Self {
        SubmitError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_hides_transport_detail() {
        let error = SubmitError::Network {
            message: "tcp connect error: Connection refused (os error 111)".to_string(),
        };

        assert_eq!(error.status_message(), "could not reach the server");
    }

    #[test]
    fn test_status_message_for_server_error() {
        let error = SubmitError::server(502, "Bad Gateway");
        assert_eq!(error.status_message(), "the server failed with HTTP 502");
    }

    #[test]
    fn test_validation_param_helper() {
        let error = SubmitError::validation_param("Category cannot be empty", "category");

        if let SubmitError::Validation { message, param } = error {
            assert_eq!(message, "Category cannot be empty");
            assert_eq!(param.as_deref(), Some("category"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let error: SubmitError = err.into();
        assert!(matches!(error, SubmitError::Serialization { .. }));
    }

    #[test]
    fn test_from_io_error() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.docx");
        let error: SubmitError = err.into();
        assert!(error.to_string().contains("missing.docx"));
    }
}
