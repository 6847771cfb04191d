//! Data Profiler Library
//!
//! Automated profiling reports for CSV datasets, built with Rust and Polars.
//!
//! # Overview
//!
//! One generate action takes a data source to something the user can look at:
//!
//! - **Data Sources**: two named demo datasets (Titanic, Iris) fetched over
//!   HTTP with literal fallback tables, or an uploaded CSV parsed strictly
//! - **Report Engines**: a pluggable [`engine::ReportEngine`] producing a
//!   [`ProfileReport`] (overview, per-variable statistics, correlations,
//!   alerts, missing values, samples)
//! - **Presentation**: the report embedded as HTML plus a download artifact,
//!   or a [`BasicAnalysis`] when no report could be generated
//! - **Progress Reporting**: step updates through a [`ProgressReporter`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use data_profiler::{DataSource, NamedDataset, ProfilingFlow, ProfilerConfig, ReportMode};
//!
//! let config = ProfilerConfig::builder()
//!     .report_mode(ReportMode::Complete)
//!     .output_dir("./outputs")
//!     .build()?;
//!
//! let outcome = ProfilingFlow::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run(&DataSource::Named(NamedDataset::Titanic))?;
//!
//! for notice in &outcome.notices {
//!     println!("{}", notice.message);
//! }
//! ```
//!
//! # Without a Profiling Engine
//!
//! Build without the `profiling` feature, or inject
//! [`engine::UnavailableEngine`], and every action ends in
//! [`FlowState::FallbackRendered`] with a basic analysis:
//!
//! ```rust,ignore
//! use data_profiler::engine::UnavailableEngine;
//! use std::sync::Arc;
//!
//! let flow = ProfilingFlow::builder()
//!     .engine(Arc::new(UnavailableEngine::default()))
//!     .build()?;
//! ```
//!
//! # Feature Flags
//!
//! - `profiling` (default): the polars report engine
//! - `http` (default): downloading named datasets with `reqwest`

pub mod config;
pub mod engine;
pub mod error;
pub mod flow;
pub mod presenter;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod source;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    ConfigValidationError, ProfilerConfig, ProfilerConfigBuilder, ReportMode, ReportSettings,
};
pub use engine::{ReportEngine, UnavailableEngine, default_engine};
#[cfg(feature = "profiling")]
pub use engine::PolarsReportEngine;
pub use error::{ProfilerError, Result as ProfilerResult, ResultExt};
pub use flow::{
    ClosureProgressReporter, FlowOutcome, FlowStage, FlowState, FlowTrace, Notice, NoticeLevel,
    PreviewOutcome, ProfilingFlow, ProfilingFlowBuilder, ProfilingSession, ProgressReporter,
    ProgressUpdate,
};
pub use presenter::{
    BasicAnalysis, DownloadArtifact, EmbeddedReport, NO_MISSING_VALUES, Presenter, QuickPreview,
    RenderedView,
};
#[cfg(feature = "profiling")]
pub use profiler::DataProfiler;
pub use quality::AlertAnalyzer;
pub use reporting::ProfileReport;
pub use source::{
    DataSource, DatasetFetcher, DatasetResolver, NamedDataset, OfflineFetcher, ResolvedTable,
    TableOrigin, default_fetcher, parse_csv,
};
pub use types::{
    Alert, AlertKind, CorrelationMatrix, DatasetOverview, DatasetProfile, DescribeStats,
    VariableKind, VariableProfile,
};
pub use utils::{DtypeCategory, get_dtype_category, is_numeric_dtype};
