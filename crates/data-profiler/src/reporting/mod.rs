//! Report model and HTML rendering.
//!
//! A [`ProfileReport`] holds everything an engine computed for one table.
//! It renders to a single self-contained HTML document (inline stylesheet,
//! no scripts, no external assets) so it can be embedded with `srcdoc` or
//! saved as a download as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_profiler::engine::{PolarsReportEngine, ReportEngine};
//!
//! let report = PolarsReportEngine::default().generate(&df, "Iris Dataset Profiling Report")?;
//! std::fs::write("iris_profile_report.html", report.to_html())?;
//! ```

mod html;
mod report;

pub use html::render_report;
pub use report::ProfileReport;
