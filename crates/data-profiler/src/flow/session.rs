//! Context carried through one generate action.

use super::state::{FlowState, FlowTrace};
use crate::config::ReportMode;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Everything one action accumulates between resolve, generate and present.
///
/// A session is created per action and dropped with its outcome; nothing
/// carries over to the next action.
#[derive(Debug, Clone)]
pub struct ProfilingSession {
    pub dataset: String,
    pub title: String,
    pub report_mode: ReportMode,
    trace: FlowTrace,
    notices: Vec<Notice>,
}

impl ProfilingSession {
    pub fn new(
        dataset: impl Into<String>,
        title: impl Into<String>,
        report_mode: ReportMode,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            title: title.into(),
            report_mode,
            trace: FlowTrace::new(),
            notices: Vec::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.trace.current()
    }

    pub fn advance(&mut self, next: FlowState) -> Result<()> {
        self.trace.advance(next)
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Warning | NoticeLevel::Error => warn!("{}", message),
            NoticeLevel::Info | NoticeLevel::Success => info!("{}", message),
        }
        self.notices.push(Notice { level, message });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn into_parts(self) -> (FlowTrace, Vec<Notice>) {
        (self.trace, self.notices)
    }
}
