//! Upload Submitter
//!
//! An async client that sends a locally selected document, tagged with a
//! category, to a processing server and reports the outcome through a
//! status region.
//!
//! # Flow
//!
//! - With no file selected, the status shows a prompt and nothing is sent.
//! - Otherwise the file and category go out as a `multipart/form-data`
//!   `POST` to the processing endpoint, with an in-progress status shown
//!   while the request is pending.
//! - A JSON `{"error": ...}` reply becomes `Error: <message>`; a
//!   `{"download": ...}` reply becomes a download link.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use upload_submitter::{Category, FileSelection, MemoryStatus, SelectedFile, SubmitterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SubmitterClient::builder()
//!         .base_url("http://localhost:5000")
//!         .build()?;
//!
//!     let selection = FileSelection::new();
//!     selection.choose(SelectedFile::from_path("report.docx").await?);
//!     let status = MemoryStatus::new();
//!
//!     let submitter = client.submitter(Arc::new(selection), Arc::new(status.clone()));
//!     let outcome = submitter.submit(&Category::new(Category::REGULAR)?).await?;
//!
//!     println!("{} ({:?})", status.text(), outcome);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod status;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{SubmitterClient, SubmitterClientBuilder};
pub use config::SubmitterConfig;
pub use errors::{SubmitError, SubmitResult};
pub use services::{DownloadClient, SubmitOutcome, UploadSubmitter};
pub use status::{ConsoleStatus, MemoryStatus, StatusContent, StatusDisplay};
pub use types::{Category, FileInput, FileSelection, SelectedFile, UploadRequest, UploadResult};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
