//! Type definitions for uploads and their results.

pub mod category;
pub mod selection;
pub mod upload;

pub use category::Category;
pub use selection::{detect_content_type, FileInput, FileSelection, SelectedFile, DOCX_CONTENT_TYPE};
pub use upload::{UploadRequest, UploadResult, CATEGORY_FIELD, FILE_FIELD};
