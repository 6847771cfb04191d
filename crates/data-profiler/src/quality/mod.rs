//! Data quality alerts module.
//!
//! This module turns a dataset profile into the list of warnings shown in
//! the report: missing values, constant or unique columns, skew, zeros,
//! duplicate rows and strongly correlated pairs.

mod alerts;

pub use alerts::{AlertAnalyzer, SKEWNESS_THRESHOLD, ZEROS_THRESHOLD};
