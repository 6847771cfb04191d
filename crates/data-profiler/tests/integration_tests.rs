//! Integration tests for the data profiler.
//!
//! These tests drive the whole generate action (resolve, generate, present)
//! through the public API with fake fetchers and engines.

use data_profiler::{
    DataSource, DatasetFetcher, FlowStage, FlowState, NamedDataset, NoticeLevel,
    NO_MISSING_VALUES, ProfileReport, ProfilerConfig, ProfilerError, ProfilingFlow, ReportEngine,
    TableOrigin, UnavailableEngine, parse_csv,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_bytes(filename: &str) -> Vec<u8> {
    std::fs::read(fixtures_path().join(filename)).expect("Failed to read fixture")
}

fn upload(filename: &str) -> DataSource {
    DataSource::Upload {
        name: filename.to_string(),
        bytes: fixture_bytes(filename),
    }
}

fn config_without_artifact() -> ProfilerConfig {
    ProfilerConfig::builder()
        .write_artifact(false)
        .build()
        .unwrap()
}

fn basic_flow() -> ProfilingFlow {
    ProfilingFlow::builder()
        .config(config_without_artifact())
        .engine(Arc::new(UnavailableEngine::default()))
        .fetcher(Arc::new(FailingFetcher::default()))
        .build()
        .unwrap()
}

/// Null cells and repeated records counted straight from the CSV text.
fn recount(filename: &str) -> (usize, usize) {
    let mut reader = csv::Reader::from_path(fixtures_path().join(filename)).unwrap();
    let mut seen = HashSet::new();
    let mut nulls = 0;
    let mut duplicates = 0;
    for record in reader.records() {
        let record = record.unwrap();
        nulls += record.iter().filter(|field| field.is_empty()).count();
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        if !seen.insert(fields) {
            duplicates += 1;
        }
    }
    (nulls, duplicates)
}

#[derive(Default)]
struct FailingFetcher {
    calls: AtomicUsize,
}

impl DatasetFetcher for FailingFetcher {
    fn fetch(&self, url: &str) -> data_profiler::ProfilerResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProfilerError::FetchFailed {
            dataset: url.to_string(),
            reason: "connection refused".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct FixtureFetcher {
    file: &'static str,
    urls: Mutex<Vec<String>>,
}

impl FixtureFetcher {
    fn new(file: &'static str) -> Self {
        Self {
            file,
            urls: Mutex::new(Vec::new()),
        }
    }
}

impl DatasetFetcher for FixtureFetcher {
    fn fetch(&self, url: &str) -> data_profiler::ProfilerResult<Vec<u8>> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(fixture_bytes(self.file))
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

/// Counts calls and always reports a generation failure.
#[derive(Default)]
struct FailingEngine {
    calls: AtomicUsize,
}

impl ReportEngine for FailingEngine {
    fn generate(
        &self,
        _table: &DataFrame,
        _title: &str,
    ) -> data_profiler::ProfilerResult<ProfileReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProfilerError::GenerationFailed("out of memory".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

// ============================================================================
// Upload Tests
// ============================================================================

#[test]
fn test_simple_upload_counts() {
    let outcome = basic_flow().run(&upload("simple.csv")).unwrap();
    let analysis = outcome.view.basic().expect("basic analysis");

    assert_eq!(outcome.rows, 2);
    assert_eq!(outcome.columns, 2);
    assert_eq!(analysis.total_rows, 2);
    assert_eq!(analysis.total_columns, 2);
    assert_eq!(analysis.missing_values, 0);
    assert_eq!(analysis.duplicate_rows, 0);
    assert!(analysis.render_text().contains(NO_MISSING_VALUES));
    assert_eq!(analysis.title, "Custom Dataset");
}

#[test]
fn test_basic_analysis_matches_recount() {
    for file in ["with_nulls_dups.csv", "titanic_subset.csv", "simple.csv"] {
        let outcome = basic_flow().run(&upload(file)).unwrap();
        let analysis = outcome.view.basic().unwrap();
        let (nulls, duplicates) = recount(file);
        assert_eq!(analysis.missing_values, nulls, "nulls in {file}");
        assert_eq!(analysis.duplicate_rows, duplicates, "duplicates in {file}");
    }
}

#[test]
fn test_basic_analysis_missing_by_column() {
    let outcome = basic_flow().run(&upload("with_nulls_dups.csv")).unwrap();
    let analysis = outcome.view.basic().unwrap();
    let missing: Vec<(&str, usize)> = analysis
        .missing_by_column
        .iter()
        .map(|c| (c.column.as_str(), c.nulls))
        .collect();
    assert_eq!(missing, vec![("city", 2), ("score", 1)]);
}

#[test]
fn test_near_equal_floats_are_not_duplicates() {
    let source = DataSource::Upload {
        name: "floats.csv".to_string(),
        bytes: b"x,y\n0.1234561,1\n0.1234564,1\n1e-7,2\n2e-7,2\n".to_vec(),
    };
    let outcome = basic_flow().run(&source).unwrap();
    let analysis = outcome.view.basic().unwrap();
    assert_eq!(analysis.total_rows, 4);
    assert_eq!(analysis.duplicate_rows, 0);
}

#[test]
fn test_counts_independent_of_row_order() {
    for file in ["with_nulls_dups.csv", "titanic_subset.csv"] {
        let text = String::from_utf8(fixture_bytes(file)).unwrap();
        let mut lines: Vec<&str> = text.lines().collect();
        lines[1..].reverse();
        let reversed = DataSource::Upload {
            name: file.to_string(),
            bytes: format!("{}\n", lines.join("\n")).into_bytes(),
        };

        let forward = basic_flow().run(&upload(file)).unwrap();
        let backward = basic_flow().run(&reversed).unwrap();
        let forward = forward.view.basic().unwrap();
        let backward = backward.view.basic().unwrap();
        assert_eq!(forward.missing_values, backward.missing_values, "nulls in {file}");
        assert_eq!(forward.duplicate_rows, backward.duplicate_rows, "duplicates in {file}");
    }
}

#[test]
fn test_malformed_upload_is_parse_failure() {
    let err = basic_flow().run(&upload("malformed.csv")).unwrap_err();
    assert!(matches!(err.root(), ProfilerError::ParseFailed(_)));
    assert_eq!(err.error_code(), "PARSE_FAILED");
    assert!(err.to_string().contains("malformed.csv"));

    let direct = parse_csv(&fixture_bytes("malformed.csv"));
    assert!(direct.is_err());
}

#[test]
fn test_upload_never_fetches() {
    let fetcher = Arc::new(FailingFetcher::default());
    let flow = ProfilingFlow::builder()
        .config(config_without_artifact())
        .engine(Arc::new(UnavailableEngine::default()))
        .fetcher(fetcher.clone())
        .build()
        .unwrap();
    let outcome = flow.run(&upload("simple.csv")).unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    assert_eq!(outcome.origin, TableOrigin::Upload {
        name: "simple.csv".to_string()
    });
}

// ============================================================================
// Named Dataset Tests
// ============================================================================

#[test]
fn test_fetch_failure_yields_that_datasets_fallback() {
    for dataset in NamedDataset::ALL {
        let outcome = basic_flow().run(&DataSource::Named(dataset)).unwrap();
        let expected = dataset.fallback_table().unwrap();

        assert!(outcome.used_fallback);
        assert_eq!(outcome.origin, TableOrigin::Fallback { dataset });
        assert!(outcome.resolved.table.equals(&expected));
        let labels: Vec<String> = outcome
            .resolved
            .table
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(labels, dataset.fallback_columns().to_vec());
        assert!(
            outcome
                .notices
                .iter()
                .any(|n| n.level == NoticeLevel::Error && n.message.contains("Error loading"))
        );
    }
}

#[test]
fn test_fallback_tables_declared_shape() {
    for dataset in NamedDataset::ALL {
        let table = dataset.fallback_table().unwrap();
        assert_eq!(table.height(), data_profiler::source::FALLBACK_ROWS);
        assert_eq!(table.width(), dataset.fallback_columns().len());
    }
}

#[test]
fn test_fetcher_receives_dataset_url() {
    let fetcher = Arc::new(FixtureFetcher::new("titanic_subset.csv"));
    let flow = ProfilingFlow::builder()
        .config(config_without_artifact())
        .engine(Arc::new(UnavailableEngine::default()))
        .fetcher(fetcher.clone())
        .build()
        .unwrap();

    let outcome = flow.run(&DataSource::Named(NamedDataset::Titanic)).unwrap();
    assert_eq!(
        *fetcher.urls.lock().unwrap(),
        vec![NamedDataset::Titanic.url().to_string()]
    );
    assert!(!outcome.used_fallback);
    assert_eq!((outcome.rows, outcome.columns), (20, 12));
    assert!(outcome.notices.iter().any(|n| {
        n.message == "Successfully loaded Titanic dataset with 20 rows and 12 columns"
    }));
}

// ============================================================================
// Fallback Rendering Tests
// ============================================================================

#[test]
fn test_capability_unavailable_skips_report_ready() {
    let outcome = basic_flow().run(&DataSource::Named(NamedDataset::Iris)).unwrap();
    assert_eq!(outcome.state, FlowState::FallbackRendered);
    assert_eq!(
        outcome.trace.states(),
        &[
            FlowState::Idle,
            FlowState::Loading,
            FlowState::ReportFailed,
            FlowState::FallbackRendered
        ]
    );
    assert!(!outcome.trace.visited(FlowState::ReportReady));
    assert!(outcome.view.download().is_none());
}

#[test]
fn test_generation_error_recovered_like_unavailable() {
    let engine = Arc::new(FailingEngine::default());
    let flow = ProfilingFlow::builder()
        .config(config_without_artifact())
        .engine(engine.clone())
        .fetcher(Arc::new(FailingFetcher::default()))
        .build()
        .unwrap();

    let outcome = flow.run(&upload("with_nulls_dups.csv")).unwrap();
    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.state, FlowState::FallbackRendered);
    assert_eq!(
        outcome.generation_error.as_ref().map(|e| e.error_code()),
        Some("GENERATION_FAILED")
    );
    assert!(outcome.notices.iter().any(|n| n.message == "Falling back to Basic Analysis"));
}

#[test]
fn test_progress_reported_in_order() {
    let stages = Arc::new(Mutex::new(Vec::new()));
    let seen = stages.clone();
    let flow = ProfilingFlow::builder()
        .config(config_without_artifact())
        .engine(Arc::new(UnavailableEngine::default()))
        .fetcher(Arc::new(FailingFetcher::default()))
        .on_progress(move |update| seen.lock().unwrap().push(update.stage))
        .build()
        .unwrap();
    flow.run(&upload("simple.csv")).unwrap();

    let stages = stages.lock().unwrap();
    assert_eq!(stages.first(), Some(&FlowStage::Loading));
    assert_eq!(stages.last(), Some(&FlowStage::Complete));
    let generating = stages.iter().position(|s| *s == FlowStage::Generating).unwrap();
    let presenting = stages.iter().position(|s| *s == FlowStage::Presenting).unwrap();
    assert!(generating < presenting);
}

#[test]
fn test_outcome_json() {
    let outcome = basic_flow().run(&upload("simple.csv")).unwrap();
    let json: serde_json::Value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["state"], "fallback_rendered");
    assert_eq!(json["view"]["kind"], "basic");
    assert_eq!(json["dataset"], "custom_dataset");
    assert_eq!(json["report_mode"], "Complete");
    assert_eq!(json["generation_error"]["code"], "CAPABILITY_UNAVAILABLE");
}

// ============================================================================
// Report Tests (polars engine)
// ============================================================================

#[cfg(feature = "profiling")]
mod report_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use data_profiler::{PolarsReportEngine, RenderedView, VariableKind};

    #[test]
    fn test_titanic_report_rendered() {
        let flow = ProfilingFlow::builder()
            .config(config_without_artifact())
            .fetcher(Arc::new(FixtureFetcher::new("titanic_subset.csv")))
            .build()
            .unwrap();

        let outcome = flow.run(&DataSource::Named(NamedDataset::Titanic)).unwrap();
        assert_eq!(outcome.state, FlowState::Rendered);
        assert_eq!(outcome.title, "Titanic Dataset Profiling Report");

        let report = outcome.report.as_ref().unwrap();
        assert_eq!(report.overview.rows, 20);
        assert_eq!(report.overview.columns, 12);
        assert!(report.correlations.is_some());
        assert_eq!(report.head.len(), 5);

        let name = report.variables.iter().find(|v| v.name == "Name").unwrap();
        assert_eq!(name.kind, VariableKind::Text);
        let sex = report.variables.iter().find(|v| v.name == "Sex").unwrap();
        assert_eq!(sex.kind, VariableKind::Categorical);

        match &outcome.view {
            RenderedView::Report {
                embed,
                download,
                warning,
            } => {
                assert_eq!(download.file_name, "titanic_profile_report.html");
                assert_eq!(download.mime, "text/html");
                assert!(download.content.contains("Titanic Dataset Profiling Report"));
                assert_eq!(embed.as_ref().map(|e| e.height), Some(800));
                assert!(warning.is_none());
            }
            RenderedView::Basic(_) => panic!("expected a report"),
        }
    }

    #[test]
    fn test_upload_report_download_name() {
        let flow = ProfilingFlow::builder()
            .config(config_without_artifact())
            .fetcher(Arc::new(FailingFetcher::default()))
            .build()
            .unwrap();
        let outcome = flow.run(&upload("with_nulls_dups.csv")).unwrap();
        assert_eq!(outcome.title, "Custom Dataset Profiling Report");
        assert_eq!(
            outcome.view.download().map(|d| d.file_name.as_str()),
            Some("custom_dataset_profile_report.html")
        );
    }

    #[test]
    fn test_generate_twice_does_not_mutate_table() {
        let table = parse_csv(&fixture_bytes("with_nulls_dups.csv")).unwrap();
        let before = table.clone();
        let engine = PolarsReportEngine::new(ProfilerConfig::default());

        let first = engine.generate(&table, "t").unwrap();
        let second = engine.generate(&table, "t").unwrap();

        assert!(table.equals_missing(&before));
        assert_eq!(first.overview, second.overview);
        assert_eq!(first.variables, second.variables);
        assert_eq!(first.alerts, second.alerts);
    }

    #[test]
    fn test_oversized_report_is_still_rendered_with_warning() {
        let config = ProfilerConfig::builder()
            .write_artifact(false)
            .max_embed_bytes(16)
            .build()
            .unwrap();
        let flow = ProfilingFlow::builder()
            .config(config)
            .fetcher(Arc::new(FailingFetcher::default()))
            .build()
            .unwrap();

        let outcome = flow.run(&upload("simple.csv")).unwrap();
        assert_eq!(outcome.state, FlowState::Rendered);
        match &outcome.view {
            RenderedView::Report { embed, warning, .. } => {
                assert!(embed.is_none());
                assert!(warning.as_deref().unwrap().contains("download"));
            }
            RenderedView::Basic(_) => panic!("expected a report"),
        }
        assert!(outcome.notices.iter().any(|n| n.level == NoticeLevel::Warning));
    }

    #[test]
    fn test_artifact_written_to_output_dir() {
        let dir = std::env::temp_dir().join(format!(
            "data-profiler-it-{}-artifact",
            std::process::id()
        ));
        let config = ProfilerConfig::builder()
            .output_dir(&dir)
            .build()
            .unwrap();
        let flow = ProfilingFlow::builder()
            .config(config)
            .fetcher(Arc::new(FailingFetcher::default()))
            .build()
            .unwrap();

        let outcome = flow.run(&DataSource::Named(NamedDataset::Iris)).unwrap();
        let path = outcome.artifact_path.clone().expect("artifact path");
        assert_eq!(path, dir.join("iris_profile_report.html"));
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
