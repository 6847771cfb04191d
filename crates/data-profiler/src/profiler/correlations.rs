//! Pairwise correlation between numeric columns.

use super::statistics::pearson;
use crate::types::CorrelationMatrix;
use crate::utils::is_numeric_dtype;
use anyhow::Result;
use polars::prelude::*;

/// Pearson matrix over every numeric column of the table.
///
/// Each pair only uses rows where both values are present, so columns with
/// different null patterns are still compared. Returns `None` when the
/// table has fewer than two numeric columns.
pub(crate) fn pearson_matrix(df: &DataFrame) -> Result<Option<CorrelationMatrix>> {
    let mut columns = Vec::new();
    let mut data: Vec<Vec<Option<f64>>> = Vec::new();

    for column in df.get_columns() {
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }
        let casted = column.as_materialized_series().cast(&DataType::Float64)?;
        let values = casted
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        columns.push(column.name().to_string());
        data.push(values);
    }

    if columns.len() < 2 {
        return Ok(None);
    }

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i..n {
            let pairs: Vec<(f64, f64)> = data[i]
                .iter()
                .zip(&data[j])
                .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                .collect();
            let r = pearson(&pairs);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(Some(CorrelationMatrix { columns, values }))
}
