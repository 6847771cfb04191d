use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic kind of a column, as shown in the report's variables section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Numeric,
    Categorical,
    Boolean,
    Datetime,
    Text,
    /// All-null columns and dtypes the profiler does not understand.
    Unsupported,
}

impl VariableKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Numeric => "Numeric",
            Self::Categorical => "Categorical",
            Self::Boolean => "Boolean",
            Self::Datetime => "DateTime",
            Self::Text => "Text",
            Self::Unsupported => "Unsupported",
        }
    }
}

/// Descriptive statistics of one numeric column.
///
/// Field order follows the familiar `count/mean/std/min/25%/50%/75%/max` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeStats {
    pub column: String,
    /// Values described. The basic analysis keeps infinite cells; report
    /// variables drop them along with nulls and NaN.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

/// A rectangular slice of a table rendered as display strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSample {
    pub columns: Vec<String>,
    /// Cells row-major; `None` marks a null cell.
    pub rows: Vec<Vec<Option<String>>>,
}

impl TableSample {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Declared dtype of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDtype {
    pub column: String,
    pub dtype: String,
}

/// Null count of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNullCount {
    pub column: String,
    pub nulls: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Numeric section of a variable profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub stats: DescribeStats,
    pub sum: f64,
    pub zeros: usize,
    pub negatives: usize,
    /// Only computed in explorative mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skewness: Option<f64>,
    /// Excess kurtosis, only computed in explorative mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kurtosis: Option<f64>,
    pub has_outliers: bool,
    pub histogram: Vec<HistogramBin>,
}

/// Everything the report shows about one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableProfile {
    pub name: String,
    pub dtype: String,
    pub kind: VariableKind,
    /// Non-null values.
    pub count: usize,
    pub distinct: usize,
    pub distinct_percentage: f64,
    pub missing: usize,
    pub missing_percentage: f64,
    pub memory_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
    /// Most frequent values, most frequent first.
    pub top_values: Vec<ValueCount>,
}

/// Dataset-level statistics shown at the top of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: usize,
    pub missing_cells: usize,
    pub missing_cells_percentage: f64,
    pub duplicate_rows: usize,
    pub duplicate_rows_percentage: f64,
    pub estimated_size_bytes: usize,
    /// Number of columns per variable kind.
    pub type_counts: BTreeMap<VariableKind, usize>,
}

/// Overview plus per-column profiles of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub overview: DatasetOverview,
    pub variables: Vec<VariableProfile>,
}

/// Pairwise Pearson correlation over numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `values[i][j]` is the coefficient of `columns[i]` and `columns[j]`;
    /// `None` when it is undefined (constant column or fewer than two pairs).
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Coefficient for a pair of columns by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }

    /// Off-diagonal pairs (upper triangle) whose absolute coefficient exceeds `threshold`.
    pub fn pairs_above(&self, threshold: f64) -> Vec<(String, String, f64)> {
        let mut pairs = Vec::new();
        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                if let Some(r) = self.values[i][j]
                    && r.abs() > threshold
                {
                    pairs.push((self.columns[i].clone(), self.columns[j].clone(), r));
                }
            }
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    HighMissing,
    Constant,
    Unique,
    HighCardinality,
    Skewed,
    Zeros,
    Duplicates,
    HighCorrelation,
}

impl AlertKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighMissing => "Missing",
            Self::Constant => "Constant",
            Self::Unique => "Unique",
            Self::HighCardinality => "High cardinality",
            Self::Skewed => "Skewed",
            Self::Zeros => "Zeros",
            Self::Duplicates => "Duplicates",
            Self::HighCorrelation => "High correlation",
        }
    }
}

/// A data quality finding shown in the report's alerts section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub columns: Vec<String>,
    pub message: String,
}
