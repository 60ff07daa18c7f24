//! Chat parameters — orchestration loop control.
//!
//! [`ChatParams`] groups the static parameters of
//! [`ProcessMessageUseCase`](crate::use_cases::process_message::ProcessMessageUseCase).

use serde::{Deserialize, Serialize};

/// Default ceiling on tool-call rounds per chat request.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

/// Orchestration loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatParams {
    /// Maximum number of tool-call rounds before the run is aborted.
    pub max_tool_rounds: usize,
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }
}

impl ChatParams {
    /// A ceiling of zero would reject every tool call, so it is raised to one.
    pub fn with_max_tool_rounds(mut self, max: usize) -> Self {
        self.max_tool_rounds = max.max(1);
        self
    }
}
