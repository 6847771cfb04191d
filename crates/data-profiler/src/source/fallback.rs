//! Literal sample tables used when a named dataset cannot be downloaded.

use polars::prelude::*;

/// Row count of every fallback table.
pub const FALLBACK_ROWS: usize = 5;

pub const TITANIC_COLUMNS: [&str; 5] = ["Survived", "Pclass", "Sex", "Age", "Fare"];

pub const IRIS_COLUMNS: [&str; 5] = [
    "sepal_length",
    "sepal_width",
    "petal_length",
    "petal_width",
    "species",
];

/// First five Titanic passengers, reduced to five columns.
pub fn titanic() -> PolarsResult<DataFrame> {
    df!(
        "Survived" => [0i64, 1, 1, 1, 0],
        "Pclass" => [3i64, 1, 3, 1, 3],
        "Sex" => ["male", "female", "female", "female", "male"],
        "Age" => [22.0f64, 38.0, 26.0, 35.0, 35.0],
        "Fare" => [7.25f64, 71.2833, 7.925, 53.1, 8.05]
    )
}

/// First five Iris flowers.
pub fn iris() -> PolarsResult<DataFrame> {
    df!(
        "sepal_length" => [5.1f64, 4.9, 4.7, 4.6, 5.0],
        "sepal_width" => [3.5f64, 3.0, 3.2, 3.1, 3.6],
        "petal_length" => [1.4f64, 1.4, 1.3, 1.5, 1.4],
        "petal_width" => [0.2f64, 0.2, 0.2, 0.2, 0.2],
        "species" => ["setosa", "setosa", "setosa", "setosa", "setosa"]
    )
}
