//! Service implementations.

mod download;
mod submitter;

pub use download::DownloadClient;
pub use submitter::{SubmitOutcome, UploadSubmitter};
