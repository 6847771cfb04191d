//! Basic analysis shown when no report can be generated, and the quick
//! preview shown before generation.

use crate::error::{Result, ResultExt};
use crate::profiler::statistics::describe;
use crate::types::{ColumnDtype, ColumnNullCount, DescribeStats, TableSample};
use crate::utils::{
    count_duplicate_rows, count_null_cells, describe_values, dtype_label, format_float,
    is_numeric_dtype, table_sample,
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Message shown when no column has a missing value.
pub const NO_MISSING_VALUES: &str = "No missing values found!";

/// Summary computed directly from the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicAnalysis {
    pub title: String,
    pub total_rows: usize,
    pub total_columns: usize,
    /// Null cells summed over every column.
    pub missing_values: usize,
    /// Rows identical to an earlier row.
    pub duplicate_rows: usize,
    pub preview: TableSample,
    pub dtypes: Vec<ColumnDtype>,
    /// Numeric columns with at least one value.
    pub statistics: Vec<DescribeStats>,
    /// Only columns with at least one null.
    pub missing_by_column: Vec<ColumnNullCount>,
}

impl BasicAnalysis {
    /// Compute the analysis of `df`, previewing its first `preview_rows` rows.
    pub fn compute(df: &DataFrame, title: impl Into<String>, preview_rows: usize) -> Result<Self> {
        let missing_by_column = df
            .get_columns()
            .iter()
            .filter(|col| col.null_count() > 0)
            .map(|col| ColumnNullCount {
                column: col.name().to_string(),
                nulls: col.null_count(),
            })
            .collect();

        Ok(Self {
            title: title.into(),
            total_rows: df.height(),
            total_columns: df.width(),
            missing_values: count_null_cells(df),
            duplicate_rows: count_duplicate_rows(df).context("Counting duplicate rows")?,
            preview: table_sample(&df.head(Some(preview_rows))).context("Building preview")?,
            dtypes: column_dtypes(df),
            statistics: describe_numeric(df)?,
            missing_by_column,
        })
    }

    pub fn has_missing(&self) -> bool {
        !self.missing_by_column.is_empty()
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Basic Analysis: {}", self.title);
        let _ = writeln!(out, "{}", "-".repeat(40));
        let _ = writeln!(out, "  Total Rows: {}", self.total_rows);
        let _ = writeln!(out, "  Total Columns: {}", self.total_columns);
        let _ = writeln!(out, "  Missing Values: {}", self.missing_values);
        let _ = writeln!(out, "  Duplicate Rows: {}", self.duplicate_rows);
        out.push('\n');

        write_section(&mut out, "DATA PREVIEW");
        write_sample(&mut out, &self.preview);
        write_section(&mut out, "DATA TYPES");
        write_dtypes(&mut out, &self.dtypes);
        write_section(&mut out, "BASIC STATISTICS");
        write_statistics(&mut out, &self.statistics);

        write_section(&mut out, "MISSING VALUES");
        if self.has_missing() {
            for column in &self.missing_by_column {
                let _ = writeln!(out, "  {:<24} {}", column.column, column.nulls);
            }
        } else {
            let _ = writeln!(out, "  {NO_MISSING_VALUES}");
        }
        out
    }
}

/// The summary shown right after a table is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickPreview {
    pub total_rows: usize,
    pub total_columns: usize,
    pub missing_values: usize,
    pub head: TableSample,
    pub dtypes: Vec<ColumnDtype>,
    pub statistics: Vec<DescribeStats>,
}

impl QuickPreview {
    pub fn compute(df: &DataFrame, rows: usize) -> Result<Self> {
        Ok(Self {
            total_rows: df.height(),
            total_columns: df.width(),
            missing_values: count_null_cells(df),
            head: table_sample(&df.head(Some(rows))).context("Building preview")?,
            dtypes: column_dtypes(df),
            statistics: describe_numeric(df)?,
        })
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "  Total Rows: {}", self.total_rows);
        let _ = writeln!(out, "  Total Columns: {}", self.total_columns);
        let _ = writeln!(out, "  Missing Values: {}", self.missing_values);
        out.push('\n');
        write_sample(&mut out, &self.head);
        write_section(&mut out, "Data Types");
        write_dtypes(&mut out, &self.dtypes);
        write_section(&mut out, "Basic Statistics");
        write_statistics(&mut out, &self.statistics);
        out
    }
}

fn column_dtypes(df: &DataFrame) -> Vec<ColumnDtype> {
    df.get_columns()
        .iter()
        .map(|col| ColumnDtype {
            column: col.name().to_string(),
            dtype: dtype_label(col.dtype()),
        })
        .collect()
}

/// Describe every numeric column that has at least one value.
///
/// Infinite cells are counted and can be the min or max.
fn describe_numeric(df: &DataFrame) -> Result<Vec<DescribeStats>> {
    let mut stats = Vec::new();
    for col in df.get_columns() {
        if !is_numeric_dtype(col.dtype()) {
            continue;
        }
        let values = describe_values(col.as_materialized_series())
            .context(format!("Reading numeric column '{}'", col.name()))?;
        if let Some(s) = describe(col.name(), &values) {
            stats.push(s);
        }
    }
    Ok(stats)
}

fn write_section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(40));
}

fn write_sample(out: &mut String, sample: &TableSample) {
    let _ = writeln!(out, "  {}", sample.columns.join(" | "));
    for row in &sample.rows {
        let cells: Vec<&str> = row
            .iter()
            .map(|cell| cell.as_deref().unwrap_or("NaN"))
            .collect();
        let _ = writeln!(out, "  {}", cells.join(" | "));
    }
    out.push('\n');
}

fn write_dtypes(out: &mut String, dtypes: &[ColumnDtype]) {
    for d in dtypes {
        let _ = writeln!(out, "  {:<24} {}", d.column, d.dtype);
    }
    out.push('\n');
}

fn write_statistics(out: &mut String, statistics: &[DescribeStats]) {
    if statistics.is_empty() {
        let _ = writeln!(out, "  No numeric columns");
        out.push('\n');
        return;
    }
    let _ = writeln!(
        out,
        "  {:<16} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for s in statistics {
        let _ = writeln!(
            out,
            "  {:<16} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            s.column,
            s.count,
            format_float(s.mean),
            s.std.map(format_float).unwrap_or_else(|| "NaN".to_string()),
            format_float(s.min),
            format_float(s.q25),
            format_float(s.q50),
            format_float(s.q75),
            format_float(s.max)
        );
    }
    out.push('\n');
}
