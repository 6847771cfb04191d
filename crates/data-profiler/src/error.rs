//! Custom error types for the profiling flow.
//!
//! This module provides the error hierarchy using `thiserror`. The first five
//! variants are the flow's own failure taxonomy; the rest wrap the libraries
//! underneath it.
//!
//! Errors are serializable so a host UI can receive them as `{code, message}`.

use crate::config::ConfigValidationError;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the profiling flow.
#[derive(Error, Debug)]
pub enum ProfilerError {
    /// A named dataset could not be downloaded (unreachable host or non-2xx status).
    #[error("Failed to fetch dataset '{dataset}': {reason}")]
    FetchFailed { dataset: String, reason: String },

    /// CSV content could not be turned into a table.
    #[error("Failed to parse CSV: {0}")]
    ParseFailed(String),

    /// No profiling engine is available in this build or session.
    #[error("Profiling capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// The profiling engine failed while computing a report.
    #[error("Failed to generate profile report: {0}")]
    GenerationFailed(String),

    /// The report could not be embedded for display.
    #[error("Failed to render profile report: {0}")]
    RenderFailed(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal error (e.g., an impossible state transition).
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV record validation error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP request error (only with "http" feature).
    #[cfg(feature = "http")]
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ProfilerError>,
    },
}

impl ProfilerError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ProfilerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FetchFailed { .. } => "FETCH_FAILED",
            Self::ParseFailed(_) => "PARSE_FAILED",
            Self::CapabilityUnavailable(_) => "CAPABILITY_UNAVAILABLE",
            Self::GenerationFailed(_) => "GENERATION_FAILED",
            Self::RenderFailed(_) => "RENDER_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Csv(_) => "CSV_ERROR",
            #[cfg(feature = "http")]
            Self::HttpRequest(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// The innermost error, with all context layers removed.
    pub fn root(&self) -> &ProfilerError {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if the flow can continue after this error.
    ///
    /// Fetch failures fall back to literal sample data, report failures fall
    /// back to the basic analysis and render failures fall back to the
    /// download artifact. Everything else aborts the current action.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.root(),
            Self::FetchFailed { .. }
                | Self::CapabilityUnavailable(_)
                | Self::GenerationFailed(_)
                | Self::RenderFailed(_)
        )
    }

    /// Check if this error means the report engine could not be used at all.
    pub fn is_capability_unavailable(&self) -> bool {
        matches!(self.root(), Self::CapabilityUnavailable(_))
    }
}

impl From<ConfigValidationError> for ProfilerError {
    fn from(err: ConfigValidationError) -> Self {
        ProfilerError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ProfilerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ProfilerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for profiler operations.
pub type Result<T> = std::result::Result<T, ProfilerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ProfilerError::Polars(e).with_context(context))
    }
}
