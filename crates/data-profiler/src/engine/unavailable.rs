use super::ReportEngine;
use crate::error::{ProfilerError, Result};
use crate::reporting::ProfileReport;
use polars::prelude::DataFrame;

/// An engine that never produces a report.
///
/// Stands in for a missing profiling backend: every call fails with
/// [`ProfilerError::CapabilityUnavailable`].
#[derive(Debug, Clone)]
pub struct UnavailableEngine {
    reason: String,
}

impl UnavailableEngine {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableEngine {
    fn default() -> Self {
        Self::new("profiling support is not available in this build")
    }
}

impl ReportEngine for UnavailableEngine {
    fn generate(&self, _table: &DataFrame, _title: &str) -> Result<ProfileReport> {
        Err(ProfilerError::CapabilityUnavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
