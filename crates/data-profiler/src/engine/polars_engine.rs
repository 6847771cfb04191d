//! Built-in report engine on top of polars.

use super::ReportEngine;
use crate::config::{ProfilerConfig, ReportSettings};
use crate::error::{ProfilerError, Result};
use crate::profiler::{DataProfiler, pearson_matrix};
use crate::quality::AlertAnalyzer;
use crate::reporting::ProfileReport;
use crate::types::ColumnNullCount;
use crate::utils::table_sample;
use polars::prelude::*;
use tracing::{debug, info};

/// Report engine computing every section with polars and the profiler.
///
/// Always runs with [`ReportSettings::comprehensive`] unless built with
/// [`PolarsReportEngine::with_settings`].
#[derive(Debug, Clone, Default)]
pub struct PolarsReportEngine {
    config: ProfilerConfig,
    settings: ReportSettings,
}

impl PolarsReportEngine {
    pub fn new(config: ProfilerConfig) -> Self {
        Self {
            config,
            settings: ReportSettings::comprehensive(),
        }
    }

    pub fn with_settings(config: ProfilerConfig, settings: ReportSettings) -> Self {
        Self { config, settings }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    fn build(&self, table: &DataFrame, title: &str) -> anyhow::Result<ProfileReport> {
        let profile = DataProfiler::profile_dataset(table, &self.config, &self.settings)?;
        debug!(
            "Profiled {} columns ({} missing cells, {} duplicate rows)",
            profile.variables.len(),
            profile.overview.missing_cells,
            profile.overview.duplicate_rows
        );

        let correlations = if self.settings.minimal {
            None
        } else {
            pearson_matrix(table)?
        };

        let alerts = AlertAnalyzer::identify_alerts(&profile, correlations.as_ref(), &self.config);

        let missing = table
            .get_columns()
            .iter()
            .map(|col| ColumnNullCount {
                column: col.name().to_string(),
                nulls: col.null_count(),
            })
            .collect();

        let rows = self.config.sample_rows;
        let head = table_sample(&table.head(Some(rows)))?;
        let tail = table_sample(&table.tail(Some(rows)))?;

        Ok(ProfileReport {
            title: title.to_string(),
            generated_at: ProfileReport::timestamp_now(),
            engine: self.name().to_string(),
            settings: self.settings,
            overview: profile.overview,
            variables: profile.variables,
            correlations,
            alerts,
            missing,
            head,
            tail,
        })
    }
}

impl ReportEngine for PolarsReportEngine {
    fn generate(&self, table: &DataFrame, title: &str) -> Result<ProfileReport> {
        if table.width() == 0 {
            return Err(ProfilerError::GenerationFailed(
                "table has no columns".to_string(),
            ));
        }

        info!(
            "Generating report '{}' for {} rows x {} columns",
            title,
            table.height(),
            table.width()
        );

        let report = self
            .build(table, title)
            .map_err(|e| ProfilerError::GenerationFailed(format!("{e:#}")))?;

        info!("Report ready with {} alerts", report.alerts.len());
        Ok(report)
    }

    fn name(&self) -> &str {
        "polars"
    }
}
