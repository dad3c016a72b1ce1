//! Status display for submission feedback.
//!
//! The status region shows one piece of content at a time. Every update
//! replaces what was there before.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Prompt shown when a submission is attempted with no file chosen.
pub const NO_FILE_PROMPT: &str = "Please choose a file first.";

/// Indicator shown while the request is in flight.
pub const IN_PROGRESS: &str = "Uploading & processing...";

/// Label placed before every error message.
pub const ERROR_PREFIX: &str = "Error: ";

/// Text leading the download link.
pub const DONE_LEAD: &str = "Done.";

/// Visible text of the download link.
pub const DOWNLOAD_LINK_TEXT: &str = "Download edited file";

/// Content of the status region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusContent {
    /// Plain text.
    Text(String),
    /// A link, optionally led by some text.
    Link {
        /// Text shown before the link.
        lead: String,
        /// Link target.
        href: String,
        /// Visible link text.
        text: String,
    },
}

impl StatusContent {
    /// Creates plain text content.
    pub fn text(text: impl Into<String>) -> Self {
        StatusContent::Text(text.into())
    }

    /// Creates an error line with the fixed `Error: ` label.
    pub fn error(message: impl AsRef<str>) -> Self {
        StatusContent::Text(format!("{}{}", ERROR_PREFIX, message.as_ref()))
    }

    /// Creates the completed-download link.
    pub fn download(href: impl Into<String>) -> Self {
        StatusContent::Link {
            lead: DONE_LEAD.to_string(),
            href: href.into(),
            text: DOWNLOAD_LINK_TEXT.to_string(),
        }
    }

    /// Returns the visible text of the content.
    pub fn visible_text(&self) -> String {
        match self {
            StatusContent::Text(text) => text.clone(),
            StatusContent::Link { lead, text, .. } if lead.is_empty() => text.clone(),
            StatusContent::Link { lead, text, .. } => format!("{} {}", lead, text),
        }
    }

    /// Returns the link target, if this content is a link.
    pub fn href(&self) -> Option<&str> {
        match self {
            StatusContent::Link { href, .. } => Some(href),
            StatusContent::Text(_) => None,
        }
    }

    /// Renders the content as HTML markup.
    pub fn to_html(&self) -> String {
        match self {
            StatusContent::Text(text) => escape_html(text),
            StatusContent::Link { lead, href, text } => {
                let anchor = format!(r#"<a href="{}">{}</a>"#, escape_html(href), escape_html(text));
                if lead.is_empty() {
                    anchor
                } else {
                    format!("{} {}", escape_html(lead), anchor)
                }
            }
        }
    }
}

impl fmt::Display for StatusContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusContent::Text(text) => f.write_str(text),
            StatusContent::Link { href, .. } => write!(f, "{} ({})", self.visible_text(), href),
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A region that displays submission status.
pub trait StatusDisplay: Send + Sync {
    /// Replaces the region's content.
    fn show(&self, content: StatusContent);

    /// Replaces the region's content with plain text.
    fn set_text(&self, text: &str) {
        self.show(StatusContent::text(text));
    }
}

/// In-memory status region.
///
/// Holds only the current content plus a count of updates. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatus {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    current: Option<StatusContent>,
    updates: usize,
}

impl MemoryStatus {
    /// Creates an empty status region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content currently displayed.
    pub fn current(&self) -> Option<StatusContent> {
        self.lock().current.clone()
    }

    /// Returns the visible text currently displayed, or an empty string.
    pub fn text(&self) -> String {
        self.current()
            .map(|c| c.visible_text())
            .unwrap_or_default()
    }

    /// Number of times the content has been replaced.
    pub fn update_count(&self) -> usize {
        self.lock().updates
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StatusDisplay for MemoryStatus {
    fn show(&self, content: StatusContent) {
        let mut state = self.lock();
        state.current = Some(content);
        state.updates += 1;
    }
}

/// Status region that writes each update as a line to a writer.
pub struct ConsoleStatus<W: Write + Send> {
    writer: Mutex<W>,
}

impl ConsoleStatus<std::io::Stderr> {
    /// Creates a status region writing to standard error.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> ConsoleStatus<W> {
    /// Creates a status region writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the region and returns the writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> StatusDisplay for ConsoleStatus<W> {
    fn show(&self, content: StatusContent) {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(writer, "{}", content).and_then(|_| writer.flush()) {
            tracing::warn!(error = %e, "Failed to write status update");
        }
    }
}

impl<W: Write + Send> fmt::Debug for ConsoleStatus<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleStatus").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_content_has_prefix() {
        let content = StatusContent::error("bad format");
        assert_eq!(content.visible_text(), "Error: bad format");
        assert_eq!(content.href(), None);
    }

    #[test]
    fn test_download_html() {
        let content = StatusContent::download("/files/out.docx");
        assert_eq!(
            content.to_html(),
            r#"Done. <a href="/files/out.docx">Download edited file</a>"#
        );
        assert_eq!(content.href(), Some("/files/out.docx"));
    }

    #[test]
    fn test_html_escapes_link_target() {
        let content = StatusContent::download(r#"/x"><script>alert(1)</script>"#);
        let html = content.to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_html_escapes_text() {
        let content = StatusContent::error("<b>bad</b> & worse");
        assert_eq!(content.to_html(), "Error: &lt;b&gt;bad&lt;/b&gt; &amp; worse");
    }

    #[test]
    fn test_memory_status_replaces_content() {
        let status = MemoryStatus::new();
        status.set_text(IN_PROGRESS);
        status.show(StatusContent::error("first"));
        status.show(StatusContent::error("second"));

        assert_eq!(status.text(), "Error: second");
        assert_eq!(status.update_count(), 3);
    }

    #[test]
    fn test_memory_status_keeps_only_latest() {
        let status = MemoryStatus::new();
        let shared = status.clone();
        for i in 0..1000 {
            shared.show(StatusContent::error(format!("attempt {}", i)));
        }
        shared.show(StatusContent::download("/download/final.docx"));

        assert_eq!(status.current(), Some(StatusContent::download("/download/final.docx")));
        assert_eq!(status.update_count(), 1001);
    }

    #[test]
    fn test_console_status_writes_lines() {
        let status = ConsoleStatus::new(Vec::new());
        status.set_text(IN_PROGRESS);
        status.show(StatusContent::download("/download/out.docx"));

        let output = String::from_utf8(status.into_inner()).unwrap();
        assert_eq!(
            output,
            "Uploading & processing...\nDone. Download edited file (/download/out.docx)\n"
        );
    }
}
