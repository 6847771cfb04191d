//! Data profiling module for dataset analysis.
//!
//! This module provides functionality for profiling datasets, including:
//! - Variable kind inference for columns
//! - Descriptive statistics and histograms
//! - Pairwise correlations
//!
//! Statistics are always compiled because the basic analysis needs them;
//! the rest is part of the `profiling` feature.

pub(crate) mod statistics;

#[cfg(feature = "profiling")]
mod correlations;
#[cfg(feature = "profiling")]
mod type_inference;

#[cfg(feature = "profiling")]
pub(crate) use correlations::pearson_matrix;
#[cfg(feature = "profiling")]
pub(crate) use type_inference::infer_variable_kind;

#[cfg(feature = "profiling")]
pub use profiler_impl::DataProfiler;

#[cfg(feature = "profiling")]
mod profiler_impl {
    use super::{infer_variable_kind, statistics};
    use crate::config::{ProfilerConfig, ReportSettings};
    use crate::types::{
        DatasetOverview, DatasetProfile, NumericSummary, ValueCount, VariableKind,
        VariableProfile,
    };
    use crate::utils::{
        count_duplicate_rows, count_null_cells, dtype_label, format_cell, is_numeric_dtype,
        numeric_values,
    };
    use anyhow::Result;
    use polars::prelude::*;
    use rand::prelude::*;
    use std::collections::{BTreeMap, HashMap};

    /// Number of most frequent values kept per column.
    const TOP_VALUES: usize = 10;

    /// Number of random non-null values used for string heuristics.
    const SAMPLE_SIZE: usize = 10;

    /// Data profiler for analyzing dataset structure and characteristics.
    pub struct DataProfiler;

    impl DataProfiler {
        /// Profile an entire table: overview counts plus one profile per column.
        ///
        /// The table is only read, never modified.
        pub fn profile_dataset(
            df: &DataFrame,
            config: &ProfilerConfig,
            settings: &ReportSettings,
        ) -> Result<DatasetProfile> {
            let mut variables = Vec::with_capacity(df.width());
            for column in df.get_columns() {
                variables.push(Self::profile_column(
                    column.as_materialized_series(),
                    df.height(),
                    config,
                    settings,
                )?);
            }

            let rows = df.height();
            let total_cells = rows * df.width();
            let missing_cells = count_null_cells(df);
            let duplicate_rows = count_duplicate_rows(df)?;

            let mut type_counts = BTreeMap::new();
            for variable in &variables {
                *type_counts.entry(variable.kind).or_insert(0) += 1;
            }

            let overview = DatasetOverview {
                rows,
                columns: df.width(),
                missing_cells,
                missing_cells_percentage: percentage(missing_cells, total_cells),
                duplicate_rows,
                duplicate_rows_percentage: percentage(duplicate_rows, rows),
                estimated_size_bytes: df.estimated_size(),
                type_counts,
            };

            Ok(DatasetProfile {
                overview,
                variables,
            })
        }

        fn profile_column(
            series: &Series,
            total_rows: usize,
            config: &ProfilerConfig,
            settings: &ReportSettings,
        ) -> Result<VariableProfile> {
            let non_null = series.drop_nulls();
            let missing = series.null_count();
            let distinct = if non_null.is_empty() {
                0
            } else {
                non_null.n_unique()?
            };

            let sample_values = sample_values(&non_null)?;
            let kind = infer_variable_kind(series, &sample_values)?;

            let numeric = if is_numeric_dtype(series.dtype()) {
                let values = numeric_values(&non_null)?;
                numeric_summary(series.name(), &values, config, settings)
            } else {
                None
            };

            let top_values = if kind == VariableKind::Numeric {
                Vec::new()
            } else {
                top_values(&non_null)?
            };

            Ok(VariableProfile {
                name: series.name().to_string(),
                dtype: dtype_label(series.dtype()),
                kind,
                count: non_null.len(),
                distinct,
                distinct_percentage: percentage(distinct, non_null.len()),
                missing,
                missing_percentage: percentage(missing, total_rows),
                memory_bytes: series.estimated_size(),
                numeric,
                top_values,
            })
        }
    }

    fn percentage(part: usize, whole: usize) -> f64 {
        if whole == 0 {
            0.0
        } else {
            (part as f64 / whole as f64) * 100.0
        }
    }

    /// Random sample of non-null values rendered as strings.
    ///
    /// Seeded so the same table always yields the same report.
    fn sample_values(non_null: &Series) -> Result<Vec<String>> {
        if non_null.is_empty() {
            return Ok(Vec::new());
        }
        let sample_size = std::cmp::min(SAMPLE_SIZE, non_null.len());
        let mut rng = StdRng::seed_from_u64(42);
        let indices: Vec<usize> = (0..non_null.len()).collect();

        let mut samples = Vec::with_capacity(sample_size);
        for idx in indices.choose_multiple(&mut rng, sample_size) {
            if let Some(value) = format_cell(&non_null.get(*idx)?) {
                samples.push(value);
            }
        }
        Ok(samples)
    }

    fn numeric_summary(
        name: &str,
        values: &[f64],
        config: &ProfilerConfig,
        settings: &ReportSettings,
    ) -> Option<NumericSummary> {
        let stats = statistics::describe(name, values)?;
        let (skewness, kurtosis) = if settings.explorative {
            (statistics::skewness(values), statistics::kurtosis(values))
        } else {
            (None, None)
        };

        Some(NumericSummary {
            stats,
            sum: values.iter().sum(),
            zeros: values.iter().filter(|v| **v == 0.0).count(),
            negatives: values.iter().filter(|v| **v < 0.0).count(),
            skewness,
            kurtosis,
            has_outliers: statistics::has_outliers(values),
            histogram: if settings.minimal {
                Vec::new()
            } else {
                statistics::histogram(values, config.histogram_bins)
            },
        })
    }

    /// Most frequent values, ties broken by value so the order is stable.
    fn top_values(non_null: &Series) -> Result<Vec<ValueCount>> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for idx in 0..non_null.len() {
            if let Some(value) = format_cell(&non_null.get(idx)?) {
                *counts.entry(value).or_insert(0) += 1;
            }
        }

        let mut top: Vec<ValueCount> = counts
            .into_iter()
            .map(|(value, count)| ValueCount { value, count })
            .collect();
        top.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        top.truncate(TOP_VALUES);
        Ok(top)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn titanic() -> DataFrame {
            df!(
                "Survived" => [0i64, 1, 1, 1, 0],
                "Sex" => ["male", "female", "female", "female", "male"],
                "Age" => [Some(22.0f64), Some(38.0), None, Some(35.0), Some(35.0)],
                "Fare" => [7.25f64, 71.2833, 7.925, 53.1, 8.05]
            )
            .unwrap()
        }

        fn profile(df: &DataFrame) -> DatasetProfile {
            DataProfiler::profile_dataset(
                df,
                &ProfilerConfig::default(),
                &ReportSettings::default(),
            )
            .unwrap()
        }

        #[test]
        fn test_overview_counts() {
            let profile = profile(&titanic());
            assert_eq!(profile.overview.rows, 5);
            assert_eq!(profile.overview.columns, 4);
            assert_eq!(profile.overview.missing_cells, 1);
            assert!((profile.overview.missing_cells_percentage - 5.0).abs() < 1e-9);
            assert_eq!(profile.overview.duplicate_rows, 0);
            assert!(profile.overview.estimated_size_bytes > 0);
        }

        #[test]
        fn test_column_profiles() {
            let profile = profile(&titanic());
            let sex = &profile.variables[1];
            assert_eq!(sex.kind, VariableKind::Categorical);
            assert_eq!(sex.distinct, 2);
            assert_eq!(sex.top_values[0].value, "female");
            assert_eq!(sex.top_values[0].count, 3);

            let age = &profile.variables[2];
            assert_eq!(age.missing, 1);
            assert_eq!(age.count, 4);
            assert!((age.missing_percentage - 20.0).abs() < 1e-9);
            let numeric = age.numeric.as_ref().unwrap();
            assert_eq!(numeric.stats.count, 4);
            assert!(numeric.skewness.is_some());
        }

        #[test]
        fn test_type_counts() {
            let profile = profile(&titanic());
            let counts = &profile.overview.type_counts;
            // numeric columns with five or fewer distinct values count as categorical
            assert_eq!(counts.get(&VariableKind::Categorical), Some(&4));
            assert_eq!(counts.get(&VariableKind::Numeric), None);
        }

        #[test]
        fn test_minimal_settings_skip_shape_statistics() {
            let settings = ReportSettings {
                minimal: true,
                explorative: false,
                progress_bar: false,
            };
            let profile =
                DataProfiler::profile_dataset(&titanic(), &ProfilerConfig::default(), &settings)
                    .unwrap();
            let fare = profile.variables[3].numeric.as_ref().unwrap();
            assert!(fare.skewness.is_none());
            assert!(fare.kurtosis.is_none());
            assert!(fare.histogram.is_empty());
        }

        #[test]
        fn test_sample_values_are_deterministic() {
            let series = Series::new("v".into(), (0..50i64).collect::<Vec<_>>());
            assert_eq!(
                sample_values(&series).unwrap(),
                sample_values(&series).unwrap()
            );
        }
    }
}
