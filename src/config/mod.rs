//! Configuration for the upload submitter.
//!
//! Holds the server location, the processing endpoint path, and the
//! request timeout.

use std::time::Duration;
use url::Url;

use crate::errors::{SubmitError, SubmitResult};

/// Default server base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default processing endpoint path.
pub const DEFAULT_PROCESS_PATH: &str = "/process";

/// Default request timeout (120 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the submitter.
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Base URL of the processing server.
    pub base_url: Url,
    /// Path of the processing endpoint.
    pub process_path: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl SubmitterConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> SubmitterConfigBuilder {
        SubmitterConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `UPLOAD_SUBMITTER_BASE_URL` (optional): Server base URL
    /// - `UPLOAD_SUBMITTER_PROCESS_PATH` (optional): Processing endpoint path
    /// - `UPLOAD_SUBMITTER_TIMEOUT` (optional): Request timeout in seconds
    pub fn from_env() -> SubmitResult<Self> {
        let mut builder = SubmitterConfigBuilder::new();

        if let Ok(base_url) = std::env::var("UPLOAD_SUBMITTER_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(path) = std::env::var("UPLOAD_SUBMITTER_PROCESS_PATH") {
            builder = builder.process_path(path);
        }

        if let Ok(timeout_str) = std::env::var("UPLOAD_SUBMITTER_TIMEOUT") {
            match timeout_str.parse::<u64>() {
                Ok(secs) => builder = builder.timeout_secs(secs),
                Err(_) => {
                    tracing::warn!(value = %timeout_str, "Ignoring invalid UPLOAD_SUBMITTER_TIMEOUT")
                }
            }
        }

        builder.build()
    }

    /// Returns the full URL for a path on the configured server.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Returns the full URL of the processing endpoint.
    pub fn process_url(&self) -> String {
        self.endpoint_url(&self.process_path)
    }

    /// Resolves a download link from a response against the base URL.
    ///
    /// Absolute links are returned unchanged.
    pub fn resolve_download(&self, href: &str) -> SubmitResult<Url> {
        Ok(self.base_url.join(href)?)
    }
}

/// Builder for `SubmitterConfig`.
#[derive(Default)]
pub struct SubmitterConfigBuilder {
    base_url: Option<String>,
    process_path: Option<String>,
    timeout: Option<Duration>,
    custom_headers: Vec<(String, String)>,
}

impl SubmitterConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the processing endpoint path.
    pub fn process_path(mut self, path: impl Into<String>) -> Self {
        self.process_path = Some(path.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> SubmitResult<SubmitterConfig> {
        let raw = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let raw = raw.trim_end_matches('/');

        // A trailing slash keeps `Url::join` from dropping the last segment
        let base_url = Url::parse(&format!("{}/", raw))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SubmitError::configuration(format!(
                "Base URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }

        let process_path = self
            .process_path
            .unwrap_or_else(|| DEFAULT_PROCESS_PATH.to_string());
        if process_path.trim_matches('/').trim().is_empty() {
            return Err(SubmitError::configuration(
                "Processing endpoint path cannot be empty",
            ));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(SubmitError::configuration("Timeout must be greater than zero"));
        }

        Ok(SubmitterConfig {
            base_url,
            process_path,
            timeout,
            custom_headers: self.custom_headers,
        })
    }
}
