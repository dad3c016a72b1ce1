//! Local file selection types.

use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::errors::{SubmitError, SubmitResult};

/// Content type for Word (OOXML) documents.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A file chosen by the user, loaded into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name sent with the upload.
    pub file_name: String,
    /// MIME content type.
    pub content_type: String,
    /// File contents.
    pub data: Vec<u8>,
}

impl SelectedFile {
    /// Creates a selected file from in-memory contents.
    ///
    /// The content type is derived from the file name extension.
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = detect_content_type(&file_name);
        Self {
            file_name,
            content_type,
            data,
        }
    }

    /// Overrides the detected content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Reads a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> SubmitResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                SubmitError::validation_param(
                    format!("'{}' does not name a file", path.display()),
                    "file",
                )
            })?;

        let data = tokio::fs::read(path).await.map_err(|e| SubmitError::Io {
            message: format!("Failed to read '{}': {}", path.display(), e),
        })?;

        tracing::debug!(file = %file_name, bytes = data.len(), "Loaded selected file");
        Ok(Self::new(file_name, data))
    }

    /// Returns the size of the file in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the file has no contents.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Detects content type from filename.
pub fn detect_content_type(filename: &str) -> String {
    let ext = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    };

    match ext.as_str() {
        "docx" => DOCX_CONTENT_TYPE.to_string(),
        "doc" => "application/msword".to_string(),
        "pdf" => mime::APPLICATION_PDF.to_string(),
        "txt" => mime::TEXT_PLAIN.to_string(),
        "json" => mime::APPLICATION_JSON.to_string(),
        _ => mime::APPLICATION_OCTET_STREAM.to_string(),
    }
}

/// Source of the current file selection.
pub trait FileInput: Send + Sync {
    /// Returns the selected file, or `None` when nothing is chosen.
    fn selection(&self) -> Option<SelectedFile>;
}

/// A file input holding zero or one file.
///
/// Clones share the same selection.
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    inner: Arc<RwLock<Option<SelectedFile>>>,
}

impl FileSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection holding `file`.
    pub fn with_file(file: SelectedFile) -> Self {
        let selection = Self::new();
        selection.choose(file);
        selection
    }

    /// Chooses a file, replacing any previous choice.
    pub fn choose(&self, file: SelectedFile) {
        match self.inner.write() {
            Ok(mut guard) => *guard = Some(file),
            Err(poisoned) => *poisoned.into_inner() = Some(file),
        }
    }

    /// Clears the selection.
    pub fn clear(&self) {
        match self.inner.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

impl FileInput for FileSelection {
    fn selection(&self) -> Option<SelectedFile> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl FileInput for Option<SelectedFile> {
    fn selection(&self) -> Option<SelectedFile> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_case::test_case;

    #[test_case("report.docx", DOCX_CONTENT_TYPE; "docx")]
    #[test_case("REPORT.DOCX", DOCX_CONTENT_TYPE; "uppercase extension")]
    #[test_case("legacy.doc", "application/msword"; "doc")]
    #[test_case("scan.pdf", "application/pdf"; "pdf")]
    #[test_case("notes", "application/octet-stream"; "no extension")]
    #[test_case("archive.tar.gz", "application/octet-stream"; "unknown extension")]
    fn test_detect_content_type(name: &str, expected: &str) {
        assert_eq!(detect_content_type(name), expected);
    }

    #[test]
    fn test_selection_choose_and_clear() {
        let selection = FileSelection::new();
        assert!(selection.selection().is_none());

        selection.choose(SelectedFile::new("a.docx", b"first".to_vec()));
        selection.choose(SelectedFile::new("b.docx", b"second".to_vec()));
        let chosen = selection.selection().unwrap();
        assert_eq!(chosen.file_name, "b.docx");
        assert_eq!(chosen.data, b"second");

        selection.clear();
        assert!(selection.selection().is_none());
    }

    #[test]
    fn test_selection_clones_share_state() {
        let selection = FileSelection::new();
        let handle = selection.clone();

        handle.choose(SelectedFile::new("a.docx", vec![1, 2, 3]));
        assert!(selection.selection().is_some());
    }

    #[test]
    fn test_debug_omits_contents() {
        let file = SelectedFile::new("secret.docx", b"confidential".to_vec());
        let debug = format!("{:?}", file);
        assert!(debug.contains("secret.docx"));
        assert!(!debug.contains("99, 111"));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.docx");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"PK\x03\x04fake-docx").unwrap();

        let file = SelectedFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "input.docx");
        assert_eq!(file.content_type, DOCX_CONTENT_TYPE);
        assert_eq!(file.data, b"PK\x03\x04fake-docx");
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SelectedFile::from_path(dir.path().join("missing.docx")).await;
        assert!(matches!(result, Err(SubmitError::Io { .. })));
    }
}
