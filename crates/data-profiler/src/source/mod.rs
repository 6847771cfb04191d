//! Data source resolution.
//!
//! Turns a user selection into a table:
//! - a named demo dataset is downloaded and parsed, falling back to a small
//!   literal table when either step fails;
//! - an uploaded file is parsed strictly and any failure aborts the action.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_profiler::source::{DataSource, DatasetResolver, NamedDataset, default_fetcher};
//!
//! let resolver = DatasetResolver::new(default_fetcher());
//! let resolved = resolver.resolve(&DataSource::Named(NamedDataset::Iris))?;
//! if resolved.used_fallback() {
//!     println!("{}", resolved.notice.unwrap_or_default());
//! }
//! ```

mod fallback;
mod fetch;
mod parse;

pub use fallback::{FALLBACK_ROWS, IRIS_COLUMNS, TITANIC_COLUMNS};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{DatasetFetcher, OfflineFetcher, default_fetcher};
pub use parse::parse_csv;

use crate::error::{Result, ResultExt};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Slug used for uploaded files in titles and download names.
pub const UPLOAD_SLUG: &str = "custom_dataset";

/// The demo datasets offered by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedDataset {
    Titanic,
    Iris,
}

impl NamedDataset {
    pub const ALL: [NamedDataset; 2] = [NamedDataset::Titanic, NamedDataset::Iris];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Titanic => "titanic",
            Self::Iris => "iris",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Titanic => "Titanic",
            Self::Iris => "Iris",
        }
    }

    /// Fixed remote location of the CSV content.
    pub fn url(&self) -> &'static str {
        match self {
            Self::Titanic => {
                "https://raw.githubusercontent.com/datasciencedojo/datasets/master/titanic.csv"
            }
            Self::Iris => "https://raw.githubusercontent.com/mwaskom/seaborn-data/master/iris.csv",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Titanic => {
                "The Titanic dataset contains information about passengers aboard the RMS Titanic, \
                 including survival status, passenger class, age, gender, and more. \
                 This dataset is commonly used for predictive modeling and data analysis exercises."
            }
            Self::Iris => {
                "The Iris flower dataset is a multivariate dataset introduced by Ronald Fisher. \
                 It contains measurements of iris flowers from three different species, making it \
                 perfect for classification and clustering analysis."
            }
        }
    }

    pub fn key_features(&self) -> &'static [&'static str] {
        match self {
            Self::Titanic => &["Survival", "Pclass", "Sex", "Age", "Fare", "Embarked"],
            Self::Iris => &[
                "Sepal length",
                "Sepal width",
                "Petal length",
                "Petal width",
                "Species",
            ],
        }
    }

    /// Column labels of the literal fallback table.
    pub fn fallback_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Titanic => &TITANIC_COLUMNS,
            Self::Iris => &IRIS_COLUMNS,
        }
    }

    /// The literal table substituted when the download fails.
    pub fn fallback_table(&self) -> Result<DataFrame> {
        let table = match self {
            Self::Titanic => fallback::titanic(),
            Self::Iris => fallback::iris(),
        };
        table.context(format!("Building {} fallback table", self.display_name()))
    }
}

impl std::fmt::Display for NamedDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What the user asked to profile.
#[derive(Debug, Clone)]
pub enum DataSource {
    Named(NamedDataset),
    /// CSV bytes supplied by the user. `name` is only used in messages.
    Upload { name: String, bytes: Vec<u8> },
}

impl DataSource {
    /// Slug used in the download file name.
    pub fn slug(&self) -> &str {
        match self {
            Self::Named(dataset) => dataset.slug(),
            Self::Upload { .. } => UPLOAD_SLUG,
        }
    }

    /// Name shown in the basic analysis heading.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Named(dataset) => dataset.display_name(),
            Self::Upload { .. } => "Custom Dataset",
        }
    }

    pub fn report_title(&self) -> String {
        match self {
            Self::Named(dataset) => format!("{} Dataset Profiling Report", dataset.display_name()),
            Self::Upload { .. } => "Custom Dataset Profiling Report".to_string(),
        }
    }

    pub fn download_file_name(&self) -> String {
        format!("{}_profile_report.html", self.slug())
    }

    /// Message shown when the report could not be generated.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Named(_) => "Advanced profiling failed. Showing Basic Analysis instead.",
            Self::Upload { .. } => "Falling back to Basic Analysis",
        }
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, Self::Upload { .. })
    }
}

/// Where a resolved table came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableOrigin {
    Remote { url: String },
    Fallback { dataset: NamedDataset },
    Upload { name: String },
}

/// A table ready to profile, plus how it was obtained.
#[derive(Debug, Clone)]
pub struct ResolvedTable {
    pub table: DataFrame,
    pub origin: TableOrigin,
    /// User-facing message when the table is not what was asked for.
    pub notice: Option<String>,
}

impl ResolvedTable {
    pub fn used_fallback(&self) -> bool {
        matches!(self.origin, TableOrigin::Fallback { .. })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.table.shape()
    }
}

/// Resolves data sources into tables.
pub struct DatasetResolver {
    fetcher: Arc<dyn DatasetFetcher>,
}

impl DatasetResolver {
    pub fn new(fetcher: Arc<dyn DatasetFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn fetcher_name(&self) -> &str {
        self.fetcher.name()
    }

    /// Produce a table for `source`.
    ///
    /// # Errors
    ///
    /// Named datasets never fail on fetch or parse problems; they fall back
    /// to their literal table instead. Uploads return
    /// [`crate::ProfilerError::ParseFailed`] when the content is not valid CSV.
    pub fn resolve(&self, source: &DataSource) -> Result<ResolvedTable> {
        match source {
            DataSource::Named(dataset) => self.resolve_named(*dataset),
            DataSource::Upload { name, bytes } => {
                let table = parse_csv(bytes).context(format!("Error loading file '{name}'"))?;
                info!(
                    "Loaded upload '{}' with {} rows and {} columns",
                    name,
                    table.height(),
                    table.width()
                );
                Ok(ResolvedTable {
                    table,
                    origin: TableOrigin::Upload { name: name.clone() },
                    notice: None,
                })
            }
        }
    }

    fn resolve_named(&self, dataset: NamedDataset) -> Result<ResolvedTable> {
        let url = dataset.url();
        info!("Fetching {} dataset via {}", dataset, self.fetcher.name());

        match self.fetcher.fetch(url).and_then(|bytes| parse_csv(&bytes)) {
            Ok(table) => {
                info!(
                    "Loaded {} dataset with {} rows and {} columns",
                    dataset,
                    table.height(),
                    table.width()
                );
                Ok(ResolvedTable {
                    table,
                    origin: TableOrigin::Remote {
                        url: url.to_string(),
                    },
                    notice: None,
                })
            }
            Err(e) => {
                warn!("Error loading {} data: {}. Using sample data.", dataset, e);
                Ok(ResolvedTable {
                    table: dataset.fallback_table()?,
                    origin: TableOrigin::Fallback { dataset },
                    notice: Some(format!(
                        "Error loading {dataset} data: {e}. \
                         Showing {FALLBACK_ROWS} sample rows instead."
                    )),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProfilerError;
    use pretty_assertions::assert_eq;

    struct StaticFetcher(&'static [u8]);

    impl DatasetFetcher for StaticFetcher {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.0.to_vec())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    #[test]
    fn test_named_metadata() {
        assert_eq!(NamedDataset::Titanic.slug(), "titanic");
        assert_eq!(
            DataSource::Named(NamedDataset::Iris).report_title(),
            "Iris Dataset Profiling Report"
        );
        assert_eq!(
            DataSource::Named(NamedDataset::Titanic).download_file_name(),
            "titanic_profile_report.html"
        );
        assert!(NamedDataset::Titanic.key_features().contains(&"Embarked"));
    }

    #[test]
    fn test_upload_metadata() {
        let source = DataSource::Upload {
            name: "sales.csv".to_string(),
            bytes: Vec::new(),
        };
        assert_eq!(source.report_title(), "Custom Dataset Profiling Report");
        assert_eq!(
            source.download_file_name(),
            "custom_dataset_profile_report.html"
        );
        assert_eq!(source.display_name(), "Custom Dataset");
    }

    #[test]
    fn test_fetch_failure_uses_fallback() {
        let resolver = DatasetResolver::new(Arc::new(OfflineFetcher));
        for dataset in NamedDataset::ALL {
            let resolved = resolver.resolve(&DataSource::Named(dataset)).unwrap();
            assert!(resolved.used_fallback());
            assert!(resolved.notice.is_some());
            assert!(resolved.table.equals(&dataset.fallback_table().unwrap()));
        }
    }

    #[test]
    fn test_unparseable_remote_content_uses_fallback() {
        let resolver = DatasetResolver::new(Arc::new(StaticFetcher(b"a,b\n1,2,3\n")));
        let resolved = resolver
            .resolve(&DataSource::Named(NamedDataset::Iris))
            .unwrap();
        assert_eq!(resolved.origin, TableOrigin::Fallback {
            dataset: NamedDataset::Iris
        });
    }

    #[test]
    fn test_remote_success() {
        let resolver = DatasetResolver::new(Arc::new(StaticFetcher(
            b"sepal_length,species\n5.1,setosa\n7.0,versicolor\n",
        )));
        let resolved = resolver
            .resolve(&DataSource::Named(NamedDataset::Iris))
            .unwrap();
        assert!(!resolved.used_fallback());
        assert_eq!(resolved.shape(), (2, 2));
        assert_eq!(resolved.notice, None);
    }

    #[test]
    fn test_bad_upload_aborts() {
        let resolver = DatasetResolver::new(Arc::new(OfflineFetcher));
        let err = resolver
            .resolve(&DataSource::Upload {
                name: "broken.csv".to_string(),
                bytes: b"a,b\n1\n".to_vec(),
            })
            .unwrap_err();
        assert!(matches!(err.root(), ProfilerError::ParseFailed(_)));
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("broken.csv"));
    }
}
