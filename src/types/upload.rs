//! Upload request and result types.

use serde_json::Value;
use std::collections::HashMap;

use crate::errors::{SubmitError, SubmitResult};
use crate::transport::{HttpResponse, MultipartPart, MultipartRequest};
use crate::types::{Category, SelectedFile};

/// Form field carrying the file contents.
pub const FILE_FIELD: &str = "file";

/// Form field carrying the category label.
pub const CATEGORY_FIELD: &str = "category";

/// A single upload: the selected file and its category.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// The file to upload.
    pub file: SelectedFile,
    /// The category label.
    pub category: Category,
}

impl UploadRequest {
    /// Creates a new upload request.
    pub fn new(file: SelectedFile, category: Category) -> Self {
        Self { file, category }
    }

    /// Builds the multipart form with exactly the `file` and `category` fields.
    pub fn into_multipart(
        self,
        url: impl Into<String>,
        headers: HashMap<String, String>,
    ) -> MultipartRequest {
        let parts = vec![
            MultipartPart::File {
                name: FILE_FIELD.to_string(),
                filename: self.file.file_name,
                content_type: self.file.content_type,
                data: self.file.data,
            },
            MultipartPart::Text {
                name: CATEGORY_FIELD.to_string(),
                value: self.category.as_str().to_string(),
            },
        ];

        MultipartRequest {
            url: url.into(),
            headers,
            parts,
        }
    }
}

/// Interpreted result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    /// The server reported an error.
    Error(String),
    /// The server produced a file at this link.
    Download(String),
}

impl UploadResult {
    /// Interprets a processing response.
    ///
    /// The body is read as JSON whatever the status code, since the server
    /// reports rejections as `{"error": ...}` with a 4xx status. Any truthy
    /// `error` value takes precedence over `download`; non-string values are
    /// shown in their JSON form.
    pub fn from_response(response: &HttpResponse) -> SubmitResult<Self> {
        let parsed: Value = match response.json() {
            Ok(parsed) => parsed,
            Err(e) if response.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(SubmitError::server(
                    response.status,
                    response.body_snippet(200),
                ))
            }
        };

        if let Some(error) = parsed.get("error").and_then(error_text) {
            return Ok(UploadResult::Error(error));
        }

        if let Some(download) = parsed
            .get("download")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
        {
            return Ok(UploadResult::Download(download.to_string()));
        }

        Err(SubmitError::UnrecognizedResponse {
            status_code: response.status,
            body: response.body_snippet(1024),
        })
    }
}

/// Text for an `error` value, or `None` when it is null, false, zero or empty.
fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
