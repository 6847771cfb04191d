//! Presentation of a generate action's result.
//!
//! A report is embedded as an HTML document of fixed height and always
//! offered as a download. Without a usable report the presenter falls back
//! to a [`BasicAnalysis`] computed directly from the table.

mod basic;

pub use basic::{BasicAnalysis, NO_MISSING_VALUES, QuickPreview};

use crate::config::ProfilerConfig;
use crate::error::{ProfilerError, Result};
use crate::reporting::ProfileReport;
use crate::utils::html_escape;
use polars::prelude::DataFrame;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// MIME type of the download artifact.
pub const HTML_MIME: &str = "text/html";

/// A report prepared for inline display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedReport {
    #[serde(skip_serializing)]
    pub html: String,
    /// Frame height in display units.
    pub height: u32,
    pub scrolling: bool,
}

impl EmbeddedReport {
    /// An `<iframe>` element carrying the document in `srcdoc`.
    pub fn to_iframe(&self) -> String {
        format!(
            "<iframe srcdoc=\"{}\" height=\"{}\" style=\"width:100%;border:none\" \
             scrolling=\"{}\"></iframe>",
            html_escape(&self.html),
            self.height,
            if self.scrolling { "yes" } else { "no" }
        )
    }
}

/// The report HTML offered for download.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub mime: String,
    #[serde(skip_serializing)]
    pub content: String,
    pub size_bytes: usize,
}

impl DownloadArtifact {
    pub fn html(file_name: impl Into<String>, content: String) -> Self {
        Self {
            file_name: file_name.into(),
            mime: HTML_MIME.to_string(),
            size_bytes: content.len(),
            content,
        }
    }

    /// Write the artifact into `dir`, creating the directory if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.content)?;
        info!("Wrote {} ({} bytes)", path.display(), self.size_bytes);
        Ok(path)
    }
}

/// What the user ends up seeing for one generate action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedView {
    /// The generated report.
    Report {
        /// `None` when embedding failed; `warning` then says why.
        embed: Option<EmbeddedReport>,
        download: DownloadArtifact,
        warning: Option<String>,
    },
    /// The basic analysis shown instead of a report.
    Basic(BasicAnalysis),
}

impl RenderedView {
    pub fn is_report(&self) -> bool {
        matches!(self, Self::Report { .. })
    }

    pub fn download(&self) -> Option<&DownloadArtifact> {
        match self {
            Self::Report { download, .. } => Some(download),
            Self::Basic(_) => None,
        }
    }

    pub fn basic(&self) -> Option<&BasicAnalysis> {
        match self {
            Self::Basic(analysis) => Some(analysis),
            Self::Report { .. } => None,
        }
    }
}

/// Turns reports and tables into views.
#[derive(Debug, Clone)]
pub struct Presenter {
    embed_height: u32,
    max_embed_bytes: usize,
    preview_rows: usize,
}

impl Presenter {
    pub fn new(config: &ProfilerConfig) -> Self {
        Self {
            embed_height: config.embed_height,
            max_embed_bytes: config.max_embed_bytes,
            preview_rows: config.preview_rows,
        }
    }

    /// Prepare `html` for inline display.
    ///
    /// # Errors
    ///
    /// [`ProfilerError::RenderFailed`] when the document is empty or larger
    /// than the configured embed limit.
    pub fn embed(&self, html: &str) -> Result<EmbeddedReport> {
        if html.trim().is_empty() {
            return Err(ProfilerError::RenderFailed(
                "report HTML is empty".to_string(),
            ));
        }
        if html.len() > self.max_embed_bytes {
            return Err(ProfilerError::RenderFailed(format!(
                "report is {} bytes, above the {} byte embed limit",
                html.len(),
                self.max_embed_bytes
            )));
        }
        Ok(EmbeddedReport {
            html: html.to_string(),
            height: self.embed_height,
            scrolling: true,
        })
    }

    /// Show a generated report. Render failures only produce a warning;
    /// the download stays available.
    pub fn present_report(&self, report: &ProfileReport, download_name: &str) -> RenderedView {
        let html = report.to_html();
        let (embed, warning) = match self.embed(&html) {
            Ok(embed) => (Some(embed), None),
            Err(e) => {
                warn!("Error displaying profile report: {}", e);
                (
                    None,
                    Some(format!(
                        "Error displaying profile report: {e}. \
                         Please download the full report instead."
                    )),
                )
            }
        };

        RenderedView::Report {
            embed,
            download: DownloadArtifact::html(download_name, html),
            warning,
        }
    }

    /// Show the basic analysis of `table`.
    pub fn present_basic(&self, table: &DataFrame, title: &str) -> Result<RenderedView> {
        Ok(RenderedView::Basic(BasicAnalysis::compute(
            table,
            title,
            self.preview_rows,
        )?))
    }

    /// The quick preview shown right after loading.
    pub fn quick_preview(&self, table: &DataFrame) -> Result<QuickPreview> {
        QuickPreview::compute(table, self.preview_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn presenter(max_embed_bytes: usize) -> Presenter {
        let config = ProfilerConfig::builder()
            .max_embed_bytes(max_embed_bytes)
            .build()
            .unwrap();
        Presenter::new(&config)
    }

    #[test]
    fn test_embed_uses_config() {
        let embed = presenter(1024).embed("<html></html>").unwrap();
        assert_eq!(embed.height, 800);
        assert!(embed.scrolling);
    }

    #[test]
    fn test_embed_rejects_empty_and_oversized() {
        let p = presenter(8);
        assert_eq!(p.embed("  ").unwrap_err().error_code(), "RENDER_FAILED");
        assert_eq!(
            p.embed("<html>too long</html>").unwrap_err().error_code(),
            "RENDER_FAILED"
        );
    }

    #[test]
    fn test_iframe_escapes_document() {
        let embed = presenter(1024).embed("<p class=\"x\">a & b</p>").unwrap();
        let iframe = embed.to_iframe();
        assert!(iframe.starts_with("<iframe srcdoc=\"&lt;p class=&quot;x&quot;&gt;a &amp; b"));
        assert!(iframe.contains("height=\"800\""));
        assert!(iframe.contains("scrolling=\"yes\""));
    }

    #[test]
    fn test_download_artifact_writes_file() {
        let dir = std::env::temp_dir().join(format!("data-profiler-test-{}", std::process::id()));
        let artifact =
            DownloadArtifact::html("iris_profile_report.html", "<html></html>".to_string());
        assert_eq!(artifact.mime, "text/html");
        let path = artifact.write_to(&dir).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_present_basic() {
        let df = df!("a" => [1i64, 1], "b" => ["x", "x"]).unwrap();
        let view = presenter(1024).present_basic(&df, "Custom Dataset").unwrap();
        let basic = view.basic().unwrap();
        assert_eq!(basic.duplicate_rows, 1);
        assert!(!view.is_report());
        assert!(view.download().is_none());
    }

    #[test]
    fn test_view_serialization_skips_content() {
        let view = RenderedView::Report {
            embed: None,
            download: DownloadArtifact::html("x.html", "<html>big</html>".to_string()),
            warning: Some("too big".to_string()),
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"kind\":\"report\""));
        assert!(json.contains("x.html"));
        assert!(!json.contains("<html>big</html>"));
    }
}
