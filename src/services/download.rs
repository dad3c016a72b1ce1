//! Retrieval of processed files from download links.

use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

use crate::config::SubmitterConfig;
use crate::errors::{SubmitError, SubmitResult};
use crate::transport::{HttpRequest, HttpTransport};

/// Fetches processed files linked from a submission result.
pub struct DownloadClient {
    config: Arc<SubmitterConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl DownloadClient {
    /// Creates a new download client.
    pub fn new(config: Arc<SubmitterConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Downloads the file behind `href` and returns its bytes.
    ///
    /// Relative links are resolved against the configured base URL.
    #[instrument(skip(self))]
    pub async fn fetch(&self, href: &str) -> SubmitResult<Vec<u8>> {
        let url = self.config.resolve_download(href)?;

        let mut request = HttpRequest::get(url.as_str());
        for (name, value) in &self.config.custom_headers {
            request = request.with_header(name.clone(), value.clone());
        }

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(SubmitError::server(
                response.status,
                response.body_snippet(200),
            ));
        }

        tracing::debug!(url = %url, bytes = response.body.len(), "Downloaded file");
        Ok(response.body)
    }

    /// Downloads the file behind `href` and writes it to `path`.
    ///
    /// Returns the number of bytes written.
    pub async fn save(&self, href: &str, path: impl AsRef<Path>) -> SubmitResult<usize> {
        let path = path.as_ref();
        let data = self.fetch(href).await?;

        tokio::fs::write(path, &data)
            .await
            .map_err(|e| SubmitError::Io {
                message: format!("Failed to write '{}': {}", path.display(), e),
            })?;

        tracing::info!(path = %path.display(), bytes = data.len(), "Saved processed file");
        Ok(data.len())
    }
}

impl std::fmt::Debug for DownloadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadClient")
            .field("base_url", &self.config.base_url.as_str())
            .finish()
    }
}
