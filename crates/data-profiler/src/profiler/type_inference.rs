//! Variable kind inference for column analysis.

use crate::types::VariableKind;
use crate::utils::{DtypeCategory, get_dtype_category, is_boolean_string};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// Date pattern regexes - compiled once at startup
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").expect("Invalid regex: YYYY-MM-DD"),
        Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}$").expect("Invalid regex: MM-DD-YYYY"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}").expect("Invalid regex: datetime"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("Invalid regex: ISO"),
    ]
});

/// Numeric columns with at most this many distinct values are categorical.
pub(crate) const LOW_CATEGORICAL_THRESHOLD: usize = 5;

/// Infer the variable kind of a column.
///
/// `sample_values` are display strings of a random sample of non-null values;
/// string heuristics (dates, booleans) only look at the sample.
pub(crate) fn infer_variable_kind(
    series: &Series,
    sample_values: &[String],
) -> PolarsResult<VariableKind> {
    if series.is_empty() || series.null_count() == series.len() {
        return Ok(VariableKind::Unsupported);
    }

    let non_null = series.drop_nulls();
    let distinct = non_null.n_unique()?;

    let kind = match get_dtype_category(series.dtype()) {
        DtypeCategory::Boolean => VariableKind::Boolean,
        DtypeCategory::Datetime => VariableKind::Datetime,
        DtypeCategory::Numeric => {
            if distinct <= LOW_CATEGORICAL_THRESHOLD {
                VariableKind::Categorical
            } else {
                VariableKind::Numeric
            }
        }
        DtypeCategory::String => {
            if is_boolean_like(sample_values, distinct) {
                VariableKind::Boolean
            } else if is_date_like(sample_values) {
                VariableKind::Datetime
            } else if is_free_text(&non_null, distinct)? {
                VariableKind::Text
            } else {
                VariableKind::Categorical
            }
        }
        DtypeCategory::Other => VariableKind::Unsupported,
    };

    Ok(kind)
}

/// A string column with two distinct values that all read as booleans.
fn is_boolean_like(sample_values: &[String], distinct: usize) -> bool {
    distinct <= 2 && !sample_values.is_empty() && sample_values.iter().all(|s| is_boolean_string(s))
}

/// Check if most sampled values match a date pattern.
///
/// Purely numeric strings are never dates so numeric timestamps stay out.
pub(crate) fn is_date_like(sample_values: &[String]) -> bool {
    let mut date_like_count = 0;
    let mut total_checked = 0;

    for sample in sample_values.iter().take(10) {
        let trimmed = sample.trim();
        if trimmed.is_empty() {
            continue;
        }
        total_checked += 1;
        if trimmed.parse::<f64>().is_ok() {
            continue;
        }
        if DATE_PATTERNS.iter().any(|p| p.is_match(trimmed)) {
            date_like_count += 1;
        }
    }

    // Need more than 70% of checked samples to be date-like
    total_checked > 0 && (date_like_count as f64 / total_checked as f64) > 0.7
}

/// Text if high uniqueness and long values.
fn is_free_text(non_null: &Series, distinct: usize) -> PolarsResult<bool> {
    if non_null.is_empty() {
        return Ok(false);
    }
    let unique_ratio = distinct as f64 / non_null.len() as f64;
    let avg_length = non_null
        .str()?
        .into_iter()
        .flatten()
        .map(|s| s.chars().count())
        .sum::<usize>() as f64
        / non_null.len() as f64;

    Ok(unique_ratio > 0.7 && avg_length > 30.0)
}
