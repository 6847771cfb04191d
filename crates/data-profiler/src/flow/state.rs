//! Per-action state machine.
//!
//! ```text
//! Idle -> Loading -> ReportReady  -> Rendered
//!                 \-> ReportFailed -> FallbackRendered
//! ```
//!
//! A failed fetch stays inside `Loading`: the fallback table is substituted
//! there and the action carries on.

use crate::error::{ProfilerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    Idle,
    Loading,
    ReportReady,
    ReportFailed,
    Rendered,
    FallbackRendered,
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rendered | Self::FallbackRendered)
    }

    pub fn can_transition_to(&self, next: FlowState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Loading)
                | (Self::Loading, Self::ReportReady)
                | (Self::Loading, Self::ReportFailed)
                | (Self::ReportReady, Self::Rendered)
                | (Self::ReportFailed, Self::FallbackRendered)
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::ReportReady => "Report Ready",
            Self::ReportFailed => "Report Failed",
            Self::Rendered => "Rendered",
            Self::FallbackRendered => "Fallback Rendered",
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The states one action went through, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowTrace {
    states: Vec<FlowState>,
}

impl Default for FlowTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowTrace {
    pub fn new() -> Self {
        Self {
            states: vec![FlowState::Idle],
        }
    }

    pub fn current(&self) -> FlowState {
        self.states.last().copied().unwrap_or_default()
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// [`ProfilerError::Internal`] if `next` is not reachable from the
    /// current state.
    pub fn advance(&mut self, next: FlowState) -> Result<()> {
        let current = self.current();
        if !current.can_transition_to(next) {
            return Err(ProfilerError::Internal(format!(
                "invalid flow transition {current} -> {next}"
            )));
        }
        debug!("Flow state {} -> {}", current, next);
        self.states.push(next);
        Ok(())
    }

    pub fn visited(&self, state: FlowState) -> bool {
        self.states.contains(&state)
    }

    pub fn states(&self) -> &[FlowState] {
        &self.states
    }
}
