//! The upload submitter.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::config::SubmitterConfig;
use crate::errors::SubmitResult;
use crate::observability::RequestTimer;
use crate::status::{StatusContent, StatusDisplay, IN_PROGRESS, NO_FILE_PROMPT};
use crate::transport::{HttpTransport, MultipartRequest};
use crate::types::{Category, FileInput, UploadRequest, UploadResult};

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No file was chosen; nothing was sent.
    NoSelection,
    /// The server rejected the upload with this message.
    Rejected {
        /// Message reported by the server.
        message: String,
    },
    /// The server processed the upload.
    Completed {
        /// Link to the processed file.
        download: String,
    },
}

impl SubmitOutcome {
    /// Returns true if the upload was processed.
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed { .. })
    }

    /// Returns the download link, if any.
    pub fn download(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Completed { download } => Some(download),
            _ => None,
        }
    }
}

/// Submits the selected file with a category and reports progress to a
/// status region.
///
/// Each call to [`submit`](Self::submit) is independent. Concurrent calls are
/// not serialized and each one writes the status region as it progresses.
pub struct UploadSubmitter {
    config: Arc<SubmitterConfig>,
    transport: Arc<dyn HttpTransport>,
    input: Arc<dyn FileInput>,
    status: Arc<dyn StatusDisplay>,
}

impl UploadSubmitter {
    /// Creates a new submitter.
    pub fn new(
        config: Arc<SubmitterConfig>,
        transport: Arc<dyn HttpTransport>,
        input: Arc<dyn FileInput>,
        status: Arc<dyn StatusDisplay>,
    ) -> Self {
        Self {
            config,
            transport,
            input,
            status,
        }
    }

    /// Submits the current selection under `category`.
    ///
    /// With no file chosen, the status shows the choose-a-file prompt and no
    /// request is made. Server-reported errors come back as
    /// [`SubmitOutcome::Rejected`]. Transport and response failures are shown
    /// in the status region and returned as `Err`.
    #[instrument(skip(self, category), fields(category = %category))]
    pub async fn submit(&self, category: &Category) -> SubmitResult<SubmitOutcome> {
        let Some(file) = self.input.selection() else {
            tracing::info!("Submission attempted without a file");
            self.status.set_text(NO_FILE_PROMPT);
            return Ok(SubmitOutcome::NoSelection);
        };

        tracing::debug!(
            file = %file.file_name,
            bytes = file.len(),
            content_type = %file.content_type,
            "Preparing upload"
        );

        let request = self.build_request(UploadRequest::new(file, category.clone()));

        self.status.set_text(IN_PROGRESS);

        let timer = RequestTimer::start("process");
        let result = self.execute(request).await;
        timer.finish(result.is_ok());

        match result {
            Ok(UploadResult::Error(message)) => {
                tracing::info!(error = %message, "Server rejected upload");
                self.status.show(StatusContent::error(&message));
                Ok(SubmitOutcome::Rejected { message })
            }
            Ok(UploadResult::Download(download)) => {
                tracing::info!(download = %download, "Upload processed");
                self.status.show(StatusContent::download(download.clone()));
                Ok(SubmitOutcome::Completed { download })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Submission failed");
                self.status.show(StatusContent::error(e.status_message()));
                Err(e)
            }
        }
    }

    fn build_request(&self, upload: UploadRequest) -> MultipartRequest {
        let mut headers: HashMap<String, String> = self
            .config
            .custom_headers
            .iter()
            .cloned()
            .collect();
        if !headers.keys().any(|name| name.eq_ignore_ascii_case("accept")) {
            headers.insert("Accept".to_string(), "application/json".to_string());
        }

        upload.into_multipart(self.config.process_url(), headers)
    }

    async fn execute(&self, request: MultipartRequest) -> SubmitResult<UploadResult> {
        let response = self.transport.send_multipart(request).await?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "Received response");
        UploadResult::from_response(&response)
    }
}

impl std::fmt::Debug for UploadSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadSubmitter")
            .field("process_url", &self.config.process_url())
            .finish()
    }
}
