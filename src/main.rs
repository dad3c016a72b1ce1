//! Command-line front end for the upload submitter.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use upload_submitter::cli::{conclude, RunStatus};
use upload_submitter::config::{DEFAULT_BASE_URL, DEFAULT_PROCESS_PATH};
use upload_submitter::observability::{init_tracing, LogFormat};
use upload_submitter::{Category, ConsoleStatus, FileSelection, SelectedFile, SubmitterClient};

/// Submit a document with a category to a processing server.
#[derive(Parser, Debug)]
#[command(name = "upload-submitter", version, about)]
struct Cli {
    /// Category label sent with the file (e.g. regular, nondrugs, senior).
    #[arg(short, long)]
    category: Category,

    /// File to upload. Omit to see the no-selection prompt.
    file: Option<PathBuf>,

    /// Base URL of the processing server.
    #[arg(long, env = "UPLOAD_SUBMITTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    server: String,

    /// Path of the processing endpoint.
    #[arg(long, env = "UPLOAD_SUBMITTER_PROCESS_PATH", default_value = DEFAULT_PROCESS_PATH)]
    process_path: String,

    /// Request timeout in seconds.
    #[arg(long, env = "UPLOAD_SUBMITTER_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Fetch the processed file and write it here.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(format).context("failed to initialize logging")?;

    if !cli.category.is_known() {
        warn!(
            category = %cli.category,
            known = ?Category::known(),
            "Category is not one the server is known to handle"
        );
    }

    let client = SubmitterClient::builder()
        .base_url(&cli.server)
        .process_path(&cli.process_path)
        .timeout_secs(cli.timeout)
        .build()
        .context("invalid client configuration")?;

    let selection = FileSelection::new();
    if let Some(path) = &cli.file {
        let file = SelectedFile::from_path(path)
            .await
            .with_context(|| format!("could not load {}", path.display()))?;
        selection.choose(file);
    }

    let submitter = client.submitter(Arc::new(selection), Arc::new(ConsoleStatus::stderr()));
    let outcome = submitter.submit(&cli.category).await?;

    let status = conclude(&outcome, &client, cli.save.as_deref())
        .await
        .context("could not finish the run")?;

    if let RunStatus::Completed { url, saved } = &status {
        if let (Some(path), Some(bytes)) = (&cli.save, saved) {
            info!(path = %path.display(), bytes, "Processed file saved");
        }
        println!("{}", url);
    }

    Ok(status.exit_code())
}
