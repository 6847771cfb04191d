//! Shared utilities for the profiling flow.
//!
//! This module contains helpers used by the profiler, the basic analysis
//! and the HTML renderer so that all of them count and format cells the
//! same way.

use crate::types::TableSample;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type for profiling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/text type
    String,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

/// Short dtype label in the style users know from dataframe libraries.
///
/// Integers map to `int64`, floats to `float64`, strings to `object`.
pub fn dtype_label(dtype: &DataType) -> String {
    match dtype {
        DataType::Int8 => "int8".to_string(),
        DataType::Int16 => "int16".to_string(),
        DataType::Int32 => "int32".to_string(),
        DataType::Int64 => "int64".to_string(),
        DataType::UInt8 => "uint8".to_string(),
        DataType::UInt16 => "uint16".to_string(),
        DataType::UInt32 => "uint32".to_string(),
        DataType::UInt64 => "uint64".to_string(),
        DataType::Float32 => "float32".to_string(),
        DataType::Float64 => "float64".to_string(),
        DataType::Boolean => "bool".to_string(),
        DataType::String => "object".to_string(),
        DataType::Date => "date".to_string(),
        DataType::Datetime(_, _) => "datetime64".to_string(),
        other => format!("{other:?}").to_lowercase(),
    }
}

// =============================================================================
// String Utilities
// =============================================================================

/// Common boolean true representations.
pub const BOOLEAN_TRUE_VALUES: [&str; 6] = ["true", "yes", "t", "y", "on", "enabled"];

/// Common boolean false representations.
pub const BOOLEAN_FALSE_VALUES: [&str; 6] = ["false", "no", "f", "n", "off", "disabled"];

/// Check if a string represents a boolean value (true or false).
pub fn is_boolean_string(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    BOOLEAN_TRUE_VALUES.contains(&lower.as_str()) || BOOLEAN_FALSE_VALUES.contains(&lower.as_str())
}

// =============================================================================
// Cell and Row Utilities
// =============================================================================

/// Render a single cell for display. Nulls become `None`.
///
/// String cells are returned without the quotes polars adds when
/// formatting an `AnyValue`.
pub fn format_cell(value: &AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some((*s).to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Float64(v) => Some(format_float(*v)),
        AnyValue::Float32(v) => Some(format_float(f64::from(*v))),
        other => Some(format!("{other}")),
    }
}

/// Format a float the way a summary table shows it (up to 6 decimals, trimmed).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.1}");
    }
    let formatted = format!("{value:.6}");
    let trimmed = formatted.trim_end_matches('0');
    trimmed.trim_end_matches('.').to_string()
}

/// Collect the rows of a table as displayable cells, row-major.
pub fn table_rows(df: &DataFrame) -> PolarsResult<Vec<Vec<Option<String>>>> {
    let mut rows: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(df.width()); df.height()];
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        for (idx, row) in rows.iter_mut().enumerate() {
            row.push(format_cell(&series.get(idx)?));
        }
    }
    Ok(rows)
}

/// Capture a table (usually a head or tail slice) for display.
pub fn table_sample(df: &DataFrame) -> PolarsResult<TableSample> {
    Ok(TableSample {
        columns: df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect(),
        rows: table_rows(df)?,
    })
}

/// Number of rows identical to an earlier row.
///
/// Values are compared as stored, not as displayed, and two nulls in the
/// same column compare equal.
pub fn count_duplicate_rows(df: &DataFrame) -> PolarsResult<usize> {
    if df.width() == 0 || df.height() == 0 {
        return Ok(0);
    }
    Ok(df.height()
        - df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?
            .height())
}

/// Total number of null cells in a table.
pub fn count_null_cells(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|col| col.null_count()).sum()
}

/// Non-null, finite values of a numeric series as `f64`.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect())
}

/// Non-null, non-NaN values of a numeric series as `f64`.
///
/// Infinities are kept, so counts and extremes match the column as stored.
pub fn describe_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

// =============================================================================
// HTML Utilities
// =============================================================================

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
