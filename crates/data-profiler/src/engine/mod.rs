//! Report engines.
//!
//! This module defines the [`ReportEngine`] trait, the single capability the
//! flow needs from a profiling backend: turn a table and a title into a
//! [`ProfileReport`]. The flow holds the engine as `Arc<dyn ReportEngine>`
//! so tests and hosts can substitute their own.
//!
//! # Feature Flag
//!
//! [`PolarsReportEngine`] requires the `profiling` feature (on by default).
//! Without it [`default_engine`] returns an [`UnavailableEngine`] and every
//! generate action falls back to the basic analysis.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_profiler::engine::{default_engine, ReportEngine};
//!
//! let engine = default_engine(&config);
//! match engine.generate(&df, "Titanic Dataset Profiling Report") {
//!     Ok(report) => println!("{} alerts", report.alerts.len()),
//!     Err(e) if e.is_capability_unavailable() => println!("no profiler"),
//!     Err(e) => return Err(e),
//! }
//! ```

#[cfg(feature = "profiling")]
mod polars_engine;
mod unavailable;

#[cfg(feature = "profiling")]
pub use polars_engine::PolarsReportEngine;
pub use unavailable::UnavailableEngine;

use crate::config::ProfilerConfig;
use crate::error::Result;
use crate::reporting::ProfileReport;
use polars::prelude::DataFrame;
use std::sync::Arc;

/// A backend that computes profiling reports.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a host can run the flow on a
/// worker thread.
///
/// # Errors
///
/// - [`crate::ProfilerError::CapabilityUnavailable`] when the backend cannot
///   run at all.
/// - [`crate::ProfilerError::GenerationFailed`] for any failure while
///   computing the report.
///
/// Implementations must not modify `table`.
pub trait ReportEngine: Send + Sync {
    /// Compute a report over `table` titled `title`.
    fn generate(&self, table: &DataFrame, title: &str) -> Result<ProfileReport>;

    /// Engine name for logging and report metadata.
    fn name(&self) -> &str;
}

/// The engine used when none is injected.
#[cfg(feature = "profiling")]
pub fn default_engine(config: &ProfilerConfig) -> Arc<dyn ReportEngine> {
    Arc::new(PolarsReportEngine::new(config.clone()))
}

/// The engine used when none is injected.
#[cfg(not(feature = "profiling"))]
pub fn default_engine(_config: &ProfilerConfig) -> Arc<dyn ReportEngine> {
    Arc::new(UnavailableEngine::default())
}
