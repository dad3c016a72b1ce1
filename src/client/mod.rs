//! Submitter client.
//!
//! Wires configuration and transport together and hands out submitters
//! bound to a file input and a status region.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{SubmitterConfig, SubmitterConfigBuilder};
use crate::errors::{SubmitError, SubmitResult};
use crate::services::{DownloadClient, UploadSubmitter};
use crate::status::StatusDisplay;
use crate::transport::{HttpTransport, HttpTransportImpl};
use crate::types::FileInput;

/// Entry point for submitting uploads to a processing server.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use upload_submitter::{Category, ConsoleStatus, FileSelection, SelectedFile, SubmitterClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SubmitterClient::builder()
///         .base_url("http://localhost:5000")
///         .build()?;
///
///     let selection = FileSelection::with_file(SelectedFile::from_path("report.docx").await?);
///     let submitter = client.submitter(Arc::new(selection), Arc::new(ConsoleStatus::stderr()));
///
///     submitter.submit(&Category::new("regular")?).await?;
///     Ok(())
/// }
/// ```
pub struct SubmitterClient {
    config: Arc<SubmitterConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl SubmitterClient {
    /// Creates a new client builder.
    pub fn builder() -> SubmitterClientBuilder {
        SubmitterClientBuilder::new()
    }

    /// Creates a client from environment variables.
    pub fn from_env() -> SubmitResult<Self> {
        let config = SubmitterConfig::from_env()?;
        SubmitterClientBuilder::from_config(config).build()
    }

    /// Returns a submitter reading from `input` and reporting to `status`.
    pub fn submitter(
        &self,
        input: Arc<dyn FileInput>,
        status: Arc<dyn StatusDisplay>,
    ) -> UploadSubmitter {
        UploadSubmitter::new(
            Arc::clone(&self.config),
            Arc::clone(&self.transport),
            input,
            status,
        )
    }

    /// Returns a client for fetching processed files.
    pub fn downloads(&self) -> DownloadClient {
        DownloadClient::new(Arc::clone(&self.config), Arc::clone(&self.transport))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SubmitterConfig {
        &self.config
    }
}

impl std::fmt::Debug for SubmitterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitterClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the submitter client.
pub struct SubmitterClientBuilder {
    config_builder: SubmitterConfigBuilder,
    config: Option<SubmitterConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SubmitterClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: SubmitterConfigBuilder::new(),
            config: None,
            transport: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: SubmitterConfig) -> Self {
        Self {
            config_builder: SubmitterConfigBuilder::new(),
            config: Some(config),
            transport: None,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the processing endpoint path.
    pub fn process_path(mut self, path: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.process_path(path);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    ///
    /// A configuration passed to [`from_config`](Self::from_config) takes
    /// precedence over individual builder settings.
    pub fn build(self) -> SubmitResult<SubmitterClient> {
        let config = match self.config {
            Some(config) => config,
            None => self.config_builder.build()?,
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransportImpl::new(config.timeout).map_err(|e| {
                SubmitError::Configuration {
                    message: e.to_string(),
                }
            })?),
        };

        tracing::debug!(process_url = %config.process_url(), "Submitter client ready");

        Ok(SubmitterClient {
            config: Arc::new(config),
            transport,
        })
    }
}

impl Default for SubmitterClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
