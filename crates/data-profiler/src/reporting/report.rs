use crate::config::ReportSettings;
use crate::error::Result;
use crate::types::{
    Alert, ColumnNullCount, CorrelationMatrix, DatasetOverview, TableSample, VariableProfile,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// A computed profiling report over one table.
///
/// Produced by a [`crate::engine::ReportEngine`]. Callers mostly treat it as
/// opaque and only use [`ProfileReport::to_html`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub title: String,
    /// Local time the report was generated, `%Y-%m-%d %H:%M:%S`.
    pub generated_at: String,
    /// Name of the engine that produced the report.
    pub engine: String,
    pub settings: ReportSettings,
    pub overview: DatasetOverview,
    pub variables: Vec<VariableProfile>,
    /// `None` when the table has fewer than two numeric columns or the
    /// engine ran in minimal mode.
    pub correlations: Option<CorrelationMatrix>,
    pub alerts: Vec<Alert>,
    /// Missing count of every column, in column order.
    pub missing: Vec<ColumnNullCount>,
    pub head: TableSample,
    pub tail: TableSample,
}

impl ProfileReport {
    /// Current local time in the format used for `generated_at`.
    pub fn timestamp_now() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Render the report as a self-contained HTML document.
    pub fn to_html(&self) -> String {
        super::html::render_report(self)
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Columns with at least one missing value.
    pub fn columns_with_missing(&self) -> impl Iterator<Item = &ColumnNullCount> {
        self.missing.iter().filter(|c| c.nulls > 0)
    }
}
