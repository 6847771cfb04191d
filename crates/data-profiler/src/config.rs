//! Configuration types for the profiling flow.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic flow setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Report mode chosen by the user.
///
/// The mode is recorded on every outcome but is not forwarded to the
/// report engine; engines always run with [`ReportSettings::comprehensive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReportMode {
    /// Full detailed report
    #[default]
    Complete,
    /// Faster basic report
    Minimal,
}

impl ReportMode {
    /// Returns a human-readable name for the mode.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::Minimal => "Minimal",
        }
    }
}

/// Settings handed to a report engine.
///
/// These are fixed for every generate action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Skip expensive sections (correlations, histograms).
    pub minimal: bool,
    /// Compute exploratory statistics (skewness, kurtosis, top values).
    pub explorative: bool,
    /// Ask the engine to display its own progress.
    pub progress_bar: bool,
}

impl ReportSettings {
    /// The settings every generate action uses.
    pub const fn comprehensive() -> Self {
        Self {
            minimal: false,
            explorative: true,
            progress_bar: false,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self::comprehensive()
    }
}

/// Configuration for the profiling flow.
///
/// Use [`ProfilerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use data_profiler::config::{ProfilerConfig, ReportMode};
///
/// let config = ProfilerConfig::builder()
///     .report_mode(ReportMode::Complete)
///     .preview_rows(10)
///     .output_dir("reports")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Report mode selected by the user. Recorded, never passed to the engine.
    /// Default: Complete
    pub report_mode: ReportMode,

    /// Number of leading rows shown in previews and the basic analysis.
    /// Default: 10
    pub preview_rows: usize,

    /// Number of rows shown in each of the report's head/tail samples.
    /// Default: 5
    pub sample_rows: usize,

    /// Height of the embedded report frame in display units.
    /// Default: 800
    pub embed_height: u32,

    /// Largest report HTML (in bytes) that is embedded inline.
    /// Bigger reports are only offered as a download.
    /// Default: 50 MiB
    pub max_embed_bytes: usize,

    /// Number of equal-width bins in numeric histograms.
    /// Default: 10
    pub histogram_bins: usize,

    /// Absolute Pearson coefficient above which a pair is flagged (0.0 - 1.0).
    /// Default: 0.9
    pub correlation_threshold: f64,

    /// Distinct-value count above which a categorical column is flagged.
    /// Default: 50
    pub high_cardinality_threshold: usize,

    /// Missing-value ratio above which a column is flagged (0.0 - 1.0).
    /// Default: 0.2
    pub missing_alert_threshold: f64,

    /// Directory the download artifact is written to.
    /// Default: "./outputs"
    pub output_dir: PathBuf,

    /// Whether the CLI writes the download artifact to disk.
    /// Default: true
    pub write_artifact: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            report_mode: ReportMode::default(),
            preview_rows: 10,
            sample_rows: 5,
            embed_height: 800,
            max_embed_bytes: 50 * 1024 * 1024,
            histogram_bins: 10,
            correlation_threshold: 0.9,
            high_cardinality_threshold: 50,
            missing_alert_threshold: 0.2,
            output_dir: PathBuf::from("./outputs"),
            write_artifact: true,
        }
    }
}

impl ProfilerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.correlation_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "correlation_threshold".to_string(),
                value: self.correlation_threshold,
            });
        }

        if !(0.0..=1.0).contains(&self.missing_alert_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "missing_alert_threshold".to_string(),
                value: self.missing_alert_threshold,
            });
        }

        if self.preview_rows == 0 {
            return Err(ConfigValidationError::InvalidPreviewRows(self.preview_rows));
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidHistogramBins(
                self.histogram_bins,
            ));
        }

        if self.embed_height == 0 {
            return Err(ConfigValidationError::InvalidEmbedHeight(self.embed_height));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid preview rows: {0} (must be at least 1)")]
    InvalidPreviewRows(usize),

    #[error("Invalid histogram bins: {0} (must be at least 1)")]
    InvalidHistogramBins(usize),

    #[error("Invalid embed height: {0} (must be at least 1)")]
    InvalidEmbedHeight(u32),
}

/// Builder for [`ProfilerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfilerConfigBuilder {
    report_mode: Option<ReportMode>,
    preview_rows: Option<usize>,
    sample_rows: Option<usize>,
    embed_height: Option<u32>,
    max_embed_bytes: Option<usize>,
    histogram_bins: Option<usize>,
    correlation_threshold: Option<f64>,
    high_cardinality_threshold: Option<usize>,
    missing_alert_threshold: Option<f64>,
    output_dir: Option<PathBuf>,
    write_artifact: Option<bool>,
}

impl ProfilerConfigBuilder {
    /// Set the report mode selected by the user.
    pub fn report_mode(mut self, mode: ReportMode) -> Self {
        self.report_mode = Some(mode);
        self
    }

    /// Set the number of preview rows.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the number of head/tail rows in the report sample section.
    pub fn sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = Some(rows);
        self
    }

    /// Set the embedded frame height.
    pub fn embed_height(mut self, height: u32) -> Self {
        self.embed_height = Some(height);
        self
    }

    /// Set the largest report size that is embedded inline.
    pub fn max_embed_bytes(mut self, bytes: usize) -> Self {
        self.max_embed_bytes = Some(bytes);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the correlation alert threshold.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.9)
    pub fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = Some(threshold);
        self
    }

    /// Set the high-cardinality alert threshold.
    pub fn high_cardinality_threshold(mut self, distinct: usize) -> Self {
        self.high_cardinality_threshold = Some(distinct);
        self
    }

    /// Set the missing-value alert threshold.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.2 = 20%)
    pub fn missing_alert_threshold(mut self, threshold: f64) -> Self {
        self.missing_alert_threshold = Some(threshold);
        self
    }

    /// Set the output directory for the download artifact.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Enable or disable writing the download artifact to disk.
    pub fn write_artifact(mut self, write: bool) -> Self {
        self.write_artifact = Some(write);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfilerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfilerConfig, ConfigValidationError> {
        let defaults = ProfilerConfig::default();
        let config = ProfilerConfig {
            report_mode: self.report_mode.unwrap_or_default(),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            sample_rows: self.sample_rows.unwrap_or(defaults.sample_rows),
            embed_height: self.embed_height.unwrap_or(defaults.embed_height),
            max_embed_bytes: self.max_embed_bytes.unwrap_or(defaults.max_embed_bytes),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            correlation_threshold: self
                .correlation_threshold
                .unwrap_or(defaults.correlation_threshold),
            high_cardinality_threshold: self
                .high_cardinality_threshold
                .unwrap_or(defaults.high_cardinality_threshold),
            missing_alert_threshold: self
                .missing_alert_threshold
                .unwrap_or(defaults.missing_alert_threshold),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            write_artifact: self.write_artifact.unwrap_or(defaults.write_artifact),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProfilerConfig::default();
        assert_eq!(config.report_mode, ReportMode::Complete);
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.embed_height, 800);
        assert_eq!(config.histogram_bins, 10);
        assert!(config.write_artifact);
    }

    #[test]
    fn test_report_settings_are_comprehensive() {
        let settings = ReportSettings::default();
        assert!(!settings.minimal);
        assert!(settings.explorative);
        assert!(!settings.progress_bar);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ProfilerConfig::builder()
            .report_mode(ReportMode::Minimal)
            .preview_rows(5)
            .embed_height(600)
            .correlation_threshold(0.8)
            .write_artifact(false)
            .build()
            .unwrap();

        assert_eq!(config.report_mode, ReportMode::Minimal);
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.embed_height, 600);
        assert_eq!(config.correlation_threshold, 0.8);
        assert!(!config.write_artifact);
    }

    #[test]
    fn test_validation_invalid_threshold() {
        let result = ProfilerConfig::builder()
            .missing_alert_threshold(1.5)
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold { .. }
        ));
    }

    #[test]
    fn test_validation_zero_preview_rows() {
        let result = ProfilerConfig::builder().preview_rows(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidPreviewRows(0)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "report_mode": "Minimal",
            "preview_rows": 20,
            "sample_rows": 3,
            "embed_height": 900,
            "max_embed_bytes": 1024,
            "histogram_bins": 20,
            "correlation_threshold": 0.75,
            "high_cardinality_threshold": 100,
            "missing_alert_threshold": 0.1,
            "output_dir": "reports",
            "write_artifact": false
        }"#;

        let config: ProfilerConfig = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(config.report_mode, ReportMode::Minimal);
        assert_eq!(config.preview_rows, 20);
        assert_eq!(config.max_embed_bytes, 1024);
        assert_eq!(config.output_dir.to_str().unwrap(), "reports");
        assert!(config.validate().is_ok());
    }
}
