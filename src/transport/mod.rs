//! HTTP transport layer for the submitter.
//!
//! Provides the transport abstraction used by the submitter and the
//! download client, plus a reqwest-backed implementation.

mod http;

pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl};

use std::collections::HashMap;
use std::time::Duration;

/// Multipart request for file uploads.
#[derive(Debug, Clone)]
pub struct MultipartRequest {
    /// Absolute request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Multipart form parts.
    pub parts: Vec<MultipartPart>,
}

impl MultipartRequest {
    /// Returns the part with the given field name, if any.
    pub fn part(&self, name: &str) -> Option<&MultipartPart> {
        self.parts.iter().find(|p| p.name() == name)
    }
}

/// A part of a multipart form.
#[derive(Clone)]
pub enum MultipartPart {
    /// Text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// File field.
    File {
        /// Field name.
        name: String,
        /// File name.
        filename: String,
        /// Content type.
        content_type: String,
        /// File data.
        data: Vec<u8>,
    },
}

impl MultipartPart {
    /// Returns the form field name.
    pub fn name(&self) -> &str {
        match self {
            MultipartPart::Text { name, .. } | MultipartPart::File { name, .. } => name,
        }
    }
}

impl std::fmt::Debug for MultipartPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultipartPart::Text { name, value } => f
                .debug_struct("Text")
                .field("name", name)
                .field("value", value)
                .finish(),
            MultipartPart::File {
                name,
                filename,
                content_type,
                data,
            } => f
                .debug_struct("File")
                .field("name", name)
                .field("filename", filename)
                .field("content_type", content_type)
                .field("len", &data.len())
                .finish(),
        }
    }
}

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// Request could not be built.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}

impl From<TransportError> for crate::errors::SubmitError {
    fn from(err: TransportError) -> Self {
        use crate::errors::SubmitError;

        match err {
            TransportError::Connection { message } => SubmitError::Network { message },
            TransportError::Timeout { timeout } => SubmitError::Timeout { timeout },
            TransportError::InvalidRequest { message } => SubmitError::Validation {
                message,
                param: None,
            },
            TransportError::InvalidResponse { message } => SubmitError::Network { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SubmitError;

    #[test]
    fn test_file_part_debug_omits_bytes() {
        let part = MultipartPart::File {
            name: "file".to_string(),
            filename: "report.docx".to_string(),
            content_type: "application/octet-stream".to_string(),
            data: vec![0x50, 0x4b, 0x03, 0x04],
        };

        let debug = format!("{:?}", part);
        assert!(debug.contains("report.docx"));
        assert!(debug.contains("len: 4"));
        assert!(!debug.contains("80, 75"));
    }

    #[test]
    fn test_lookup_part_by_name() {
        let request = MultipartRequest {
            url: "http://localhost:5000/process".to_string(),
            headers: HashMap::new(),
            parts: vec![MultipartPart::Text {
                name: "category".to_string(),
                value: "senior".to_string(),
            }],
        };

        assert!(request.part("category").is_some());
        assert!(request.part("file").is_none());
    }

    #[test]
    fn test_timeout_maps_to_submit_timeout() {
        let err: SubmitError = TransportError::Timeout {
            timeout: Duration::from_secs(5),
        }
        .into();
        assert!(matches!(err, SubmitError::Timeout { timeout } if timeout == Duration::from_secs(5)));
    }
}
