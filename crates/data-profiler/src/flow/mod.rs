//! The generate action.
//!
//! [`ProfilingFlow`] wires a [`DatasetResolver`], a [`ReportEngine`] and a
//! [`Presenter`] together and runs one action per call:
//!
//! 1. resolve the source into a table (named datasets fall back to their
//!    literal table, bad uploads abort);
//! 2. ask the engine for a report;
//! 3. render the report, or the basic analysis when the engine failed.
//!
//! Every step is recorded on a [`ProfilingSession`] whose trace and notices
//! end up in the returned [`FlowOutcome`].
//!
//! # Example
//!
//! ```rust,ignore
//! use data_profiler::{DataSource, NamedDataset, ProfilingFlow};
//!
//! let outcome = ProfilingFlow::builder()
//!     .on_progress(|update| println!("{}", update.message))
//!     .build()?
//!     .run(&DataSource::Named(NamedDataset::Titanic))?;
//!
//! println!("finished in state {}", outcome.state);
//! ```

mod progress;
mod session;
mod state;

pub use progress::{ClosureProgressReporter, FlowStage, ProgressReporter, ProgressUpdate};
pub use session::{Notice, NoticeLevel, ProfilingSession};
pub use state::{FlowState, FlowTrace};

use crate::config::{ConfigValidationError, ProfilerConfig, ReportMode};
use crate::engine::{ReportEngine, default_engine};
use crate::error::{ProfilerError, Result};
use crate::presenter::{Presenter, QuickPreview, RenderedView};
use crate::reporting::ProfileReport;
use crate::source::{
    DataSource, DatasetFetcher, DatasetResolver, ResolvedTable, TableOrigin, default_fetcher,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Result of one generate action.
#[derive(Debug, Serialize)]
pub struct FlowOutcome {
    /// Terminal state: [`FlowState::Rendered`] or [`FlowState::FallbackRendered`].
    pub state: FlowState,
    pub trace: FlowTrace,
    /// The mode the user selected. Generation ignores it.
    pub report_mode: ReportMode,
    pub dataset: String,
    pub title: String,
    pub rows: usize,
    pub columns: usize,
    pub origin: TableOrigin,
    pub used_fallback: bool,
    pub engine: String,
    pub notices: Vec<Notice>,
    pub view: RenderedView,
    /// Why the engine produced no report, when it did not.
    pub generation_error: Option<ProfilerError>,
    /// Where the download artifact was written, if anywhere.
    pub artifact_path: Option<PathBuf>,
    pub duration_ms: u64,
    #[serde(skip)]
    pub report: Option<ProfileReport>,
    #[serde(skip)]
    pub resolved: ResolvedTable,
}

impl FlowOutcome {
    pub fn is_fallback(&self) -> bool {
        self.state == FlowState::FallbackRendered
    }
}

/// Result of a preview action: the table is loaded and summarized but no
/// report is generated.
#[derive(Debug, Serialize)]
pub struct PreviewOutcome {
    pub dataset: String,
    pub origin: TableOrigin,
    pub notices: Vec<Notice>,
    pub preview: QuickPreview,
}

/// Runs generate actions.
///
/// Use [`ProfilingFlow::builder()`] to inject a configuration, an engine, a
/// fetcher or a progress reporter.
pub struct ProfilingFlow {
    config: ProfilerConfig,
    engine: Arc<dyn ReportEngine>,
    resolver: DatasetResolver,
    presenter: Presenter,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(ProfilingFlow: Send, Sync);
static_assertions::assert_impl_all!(FlowOutcome: Send);

impl ProfilingFlow {
    pub fn builder() -> ProfilingFlowBuilder {
        ProfilingFlowBuilder::default()
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Run one generate action for `source`.
    ///
    /// # Errors
    ///
    /// Only an upload that cannot be parsed (or an I/O failure while
    /// computing the basic analysis) aborts the action. Fetch failures,
    /// engine failures and render failures are recovered and reported
    /// through the outcome's notices.
    pub fn run(&self, source: &DataSource) -> Result<FlowOutcome> {
        match self.run_internal(source) {
            Ok(outcome) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Finished in state {}",
                    outcome.state
                )));
                Ok(outcome)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Profiling flow error: {}", e);
                Err(e)
            }
        }
    }

    fn run_internal(&self, source: &DataSource) -> Result<FlowOutcome> {
        let start = Instant::now();
        let mut session =
            ProfilingSession::new(source.slug(), source.report_title(), self.config.report_mode);
        info!(
            "Starting profiling of {} (mode: {})",
            source.display_name(),
            session.report_mode.display_name()
        );

        // ===== Loading =====
        session.advance(FlowState::Loading)?;
        self.report_progress(ProgressUpdate::new(
            FlowStage::Loading,
            0.0,
            format!("Loading {}", source.display_name()),
        ));
        let resolved = self.load(source, &mut session)?;
        self.report_progress(ProgressUpdate::new(FlowStage::Loading, 1.0, "Dataset loaded"));

        // ===== Generating =====
        self.report_progress(ProgressUpdate::new(
            FlowStage::Generating,
            0.0,
            format!("Generating report with the {} engine", self.engine.name()),
        ));
        let generated = self.engine.generate(&resolved.table, &session.title);

        // ===== Presenting =====
        self.report_progress(ProgressUpdate::new(
            FlowStage::Presenting,
            0.0,
            "Presenting results",
        ));
        let (view, report, generation_error, artifact_path) = match generated {
            Ok(report) => {
                session.advance(FlowState::ReportReady)?;
                let (view, artifact_path) = self.present_report(source, &report, &mut session);
                session.advance(FlowState::Rendered)?;
                (view, Some(report), None, artifact_path)
            }
            Err(e) => {
                let e = into_generation_error(e);
                session.advance(FlowState::ReportFailed)?;
                if e.is_capability_unavailable() {
                    session.notify(
                        NoticeLevel::Error,
                        format!("Profiling engine unavailable: {e}"),
                    );
                } else {
                    session.notify(
                        NoticeLevel::Error,
                        format!("Error creating profile report: {e}"),
                    );
                }
                session.notify(NoticeLevel::Warning, source.fallback_message());
                let view = self
                    .presenter
                    .present_basic(&resolved.table, source.display_name())?;
                session.advance(FlowState::FallbackRendered)?;
                (view, None, Some(e), None)
            }
        };
        self.report_progress(ProgressUpdate::new(FlowStage::Presenting, 1.0, "Results ready"));

        let duration_ms = start.elapsed().as_millis() as u64;
        let state = session.state();
        info!("Profiling finished in state {} ({} ms)", state, duration_ms);

        let (rows, columns) = resolved.shape();
        let dataset = session.dataset.clone();
        let title = session.title.clone();
        let report_mode = session.report_mode;
        let (trace, notices) = session.into_parts();
        Ok(FlowOutcome {
            state,
            trace,
            report_mode,
            dataset,
            title,
            rows,
            columns,
            origin: resolved.origin.clone(),
            used_fallback: resolved.used_fallback(),
            engine: self.engine.name().to_string(),
            notices,
            view,
            generation_error,
            artifact_path,
            duration_ms,
            report,
            resolved,
        })
    }

    /// Load `source` and show the quick preview without generating a report.
    pub fn preview(&self, source: &DataSource) -> Result<PreviewOutcome> {
        let mut session =
            ProfilingSession::new(source.slug(), source.report_title(), self.config.report_mode);
        session.advance(FlowState::Loading)?;
        let resolved = self.load(source, &mut session)?;
        let preview = self.presenter.quick_preview(&resolved.table)?;
        let dataset = session.dataset.clone();
        let (_, notices) = session.into_parts();
        Ok(PreviewOutcome {
            dataset,
            origin: resolved.origin,
            notices,
            preview,
        })
    }

    fn load(&self, source: &DataSource, session: &mut ProfilingSession) -> Result<ResolvedTable> {
        let resolved = self.resolver.resolve(source)?;
        if let Some(notice) = &resolved.notice {
            session.notify(NoticeLevel::Error, notice.clone());
        }

        let (rows, columns) = resolved.shape();
        let message = if source.is_upload() {
            format!("Successfully loaded dataset with {rows} rows and {columns} columns")
        } else {
            format!(
                "Successfully loaded {} dataset with {rows} rows and {columns} columns",
                source.display_name()
            )
        };
        session.notify(NoticeLevel::Success, message);
        Ok(resolved)
    }

    fn present_report(
        &self,
        source: &DataSource,
        report: &ProfileReport,
        session: &mut ProfilingSession,
    ) -> (RenderedView, Option<PathBuf>) {
        let view = self
            .presenter
            .present_report(report, &source.download_file_name());
        session.notify(NoticeLevel::Success, "Profile Report Generated Successfully!");
        if let RenderedView::Report {
            warning: Some(warning),
            ..
        } = &view
        {
            session.notify(NoticeLevel::Warning, warning.clone());
        }

        let mut artifact_path = None;
        if self.config.write_artifact
            && let Some(download) = view.download()
        {
            match download.write_to(&self.config.output_dir) {
                Ok(path) => artifact_path = Some(path),
                Err(e) => session.notify(
                    NoticeLevel::Warning,
                    format!("Could not save {}: {e}", download.file_name),
                ),
            }
        }
        (view, artifact_path)
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

/// Engines are expected to fail with `CapabilityUnavailable` or
/// `GenerationFailed`; anything else is treated as a generation failure.
fn into_generation_error(e: ProfilerError) -> ProfilerError {
    match e.root() {
        ProfilerError::CapabilityUnavailable(_) | ProfilerError::GenerationFailed(_) => e,
        _ => ProfilerError::GenerationFailed(e.to_string()),
    }
}

/// Builder for [`ProfilingFlow`].
#[derive(Default)]
pub struct ProfilingFlowBuilder {
    config: Option<ProfilerConfig>,
    engine: Option<Arc<dyn ReportEngine>>,
    fetcher: Option<Arc<dyn DatasetFetcher>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(ProfilingFlowBuilder: Send);

impl ProfilingFlowBuilder {
    pub fn config(mut self, config: ProfilerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `engine` instead of [`default_engine`].
    ///
    /// ```rust,ignore
    /// let flow = ProfilingFlow::builder()
    ///     .engine(Arc::new(UnavailableEngine::default()))
    ///     .build()?;
    /// ```
    pub fn engine(mut self, engine: Arc<dyn ReportEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Use `fetcher` for named datasets instead of [`default_fetcher`].
    pub fn fetcher(mut self, fetcher: Arc<dyn DatasetFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the flow.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<ProfilingFlow, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let engine = self.engine.unwrap_or_else(|| default_engine(&config));
        let fetcher = self.fetcher.unwrap_or_else(default_fetcher);

        Ok(ProfilingFlow {
            presenter: Presenter::new(&config),
            resolver: DatasetResolver::new(fetcher),
            engine,
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
