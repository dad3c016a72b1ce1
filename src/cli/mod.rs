//! Support for the command-line front end.
//!
//! Turns a finished submission into the run's result: the resolved download
//! link, an optional saved copy, and the process exit code.

use std::path::Path;
use std::process::ExitCode;
use url::Url;

use crate::client::SubmitterClient;
use crate::errors::SubmitResult;
use crate::services::SubmitOutcome;

/// Result of a command-line run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// The server produced a file.
    Completed {
        /// Absolute download URL.
        url: Url,
        /// Bytes written when the file was saved locally.
        saved: Option<usize>,
    },
    /// No file was chosen or the server rejected the upload.
    Failed,
}

impl RunStatus {
    /// Returns true if the run should exit successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Completed { .. })
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Resolves the download link of a completed submission and, with `save`,
/// fetches the processed file to that path.
pub async fn conclude(
    outcome: &SubmitOutcome,
    client: &SubmitterClient,
    save: Option<&Path>,
) -> SubmitResult<RunStatus> {
    let SubmitOutcome::Completed { download } = outcome else {
        return Ok(RunStatus::Failed);
    };

    let url = client.config().resolve_download(download)?;
    let saved = match save {
        Some(path) => Some(client.downloads().save(download, path).await?),
        None => None,
    };

    Ok(RunStatus::Completed { url, saved })
}
