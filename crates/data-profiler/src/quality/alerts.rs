use crate::config::ProfilerConfig;
use crate::types::{
    Alert, AlertKind, CorrelationMatrix, DatasetProfile, VariableKind, VariableProfile,
};

/// Absolute skewness above which a numeric column is flagged.
pub const SKEWNESS_THRESHOLD: f64 = 20.0;

/// Share of zero values above which a numeric column is flagged.
pub const ZEROS_THRESHOLD: f64 = 0.1;

pub struct AlertAnalyzer;

impl AlertAnalyzer {
    /// Collect every alert for a profiled table.
    ///
    /// Dataset-level alerts come first, then per-column alerts in column
    /// order, then correlated pairs.
    pub fn identify_alerts(
        profile: &DatasetProfile,
        correlations: Option<&CorrelationMatrix>,
        config: &ProfilerConfig,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if profile.overview.duplicate_rows > 0 {
            alerts.push(Alert {
                kind: AlertKind::Duplicates,
                columns: Vec::new(),
                message: format!(
                    "Dataset has {} ({:.1}%) duplicate rows",
                    profile.overview.duplicate_rows, profile.overview.duplicate_rows_percentage
                ),
            });
        }

        for variable in &profile.variables {
            alerts.extend(Self::column_alerts(variable, profile.overview.rows, config));
        }

        if let Some(matrix) = correlations {
            for (a, b, r) in matrix.pairs_above(config.correlation_threshold) {
                alerts.push(Alert {
                    kind: AlertKind::HighCorrelation,
                    message: format!("{a} is highly correlated with {b} (r = {r:.3})"),
                    columns: vec![a, b],
                });
            }
        }

        alerts
    }

    fn column_alerts(
        variable: &VariableProfile,
        rows: usize,
        config: &ProfilerConfig,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();
        let name = &variable.name;
        let alert = |kind: AlertKind, message: String| Alert {
            kind,
            columns: vec![name.clone()],
            message,
        };

        if variable.missing > 0
            && variable.missing_percentage / 100.0 > config.missing_alert_threshold
        {
            alerts.push(alert(
                AlertKind::HighMissing,
                format!(
                    "{name} has {} ({:.1}%) missing values",
                    variable.missing, variable.missing_percentage
                ),
            ));
        }

        if variable.distinct == 1 {
            let value = variable
                .top_values
                .first()
                .map(|v| v.value.clone())
                .or_else(|| {
                    variable
                        .numeric
                        .as_ref()
                        .map(|n| crate::utils::format_float(n.stats.min))
                })
                .unwrap_or_default();
            alerts.push(alert(
                AlertKind::Constant,
                format!("{name} has constant value \"{value}\""),
            ));
        } else if rows > 1 && variable.missing == 0 && variable.distinct == rows {
            alerts.push(alert(
                AlertKind::Unique,
                format!("{name} has unique values"),
            ));
        }

        if variable.kind == VariableKind::Categorical
            && variable.distinct > config.high_cardinality_threshold
        {
            alerts.push(alert(
                AlertKind::HighCardinality,
                format!("{name} has a high cardinality: {} distinct values", variable.distinct),
            ));
        }

        if let Some(numeric) = &variable.numeric {
            if let Some(skew) = numeric.skewness
                && skew.abs() > SKEWNESS_THRESHOLD
            {
                alerts.push(alert(
                    AlertKind::Skewed,
                    format!("{name} is highly skewed (γ1 = {skew:.2})"),
                ));
            }

            let count = numeric.stats.count;
            if count > 0 && numeric.zeros as f64 / count as f64 > ZEROS_THRESHOLD {
                alerts.push(alert(
                    AlertKind::Zeros,
                    format!(
                        "{name} has {} ({:.1}%) zeros",
                        numeric.zeros,
                        numeric.zeros as f64 / count as f64 * 100.0
                    ),
                ));
            }
        }

        alerts
    }
}
