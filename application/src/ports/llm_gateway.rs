//! LLM Gateway port
//!
//! Defines the interface for communicating with the inference endpoint.
//! The gateway is stateless: every call sends the whole conversation so far
//! together with the full tool catalog.

use async_trait::async_trait;
use expense_domain::{Conversation, ToolCallRequest, ToolCatalog, Turn};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Timeout")]
    Timeout,

    #[error("Unexpected response format: {0}")]
    ResponseFormat(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// What the model produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Final natural-language answer; ends the run.
    FinalAnswer { text: String },
    /// The model wants tools executed before it answers.
    ToolCallsRequested {
        text: Option<String>,
        calls: Vec<ToolCallRequest>,
    },
}

impl Completion {
    /// Assistant turn to append to the conversation for this completion.
    pub fn assistant_turn(&self) -> Turn {
        match self {
            Completion::FinalAnswer { text } => Turn::assistant(text.clone()),
            Completion::ToolCallsRequested { text, calls } => {
                Turn::assistant_with_calls(text.clone(), calls.clone())
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Completion::FinalAnswer { .. } => "final_answer",
            Completion::ToolCallsRequested { .. } => "tool_calls",
        }
    }
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer. Failures are
/// returned as-is; retry policy is not the gateway's concern.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    async fn complete(
        &self,
        conversation: &Conversation,
        catalog: &ToolCatalog,
    ) -> Result<Completion, GatewayError>;

    /// Short label for logs (model or deployment name).
    fn describe(&self) -> String {
        "llm".to_string()
    }
}

/// Inference availability, decided once at construction.
#[derive(Clone)]
pub enum InferenceBackend {
    Enabled(Arc<dyn LlmGateway>),
    /// No endpoint could be configured; chat answers with a fixed notice.
    Disabled { reason: String },
}

impl InferenceBackend {
    pub fn enabled(gateway: Arc<dyn LlmGateway>) -> Self {
        InferenceBackend::Enabled(gateway)
    }

    pub fn disabled(reason: impl Into<String>) -> Self {
        InferenceBackend::Disabled {
            reason: reason.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, InferenceBackend::Enabled(_))
    }
}

impl fmt::Debug for InferenceBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceBackend::Enabled(gateway) => {
                f.debug_tuple("Enabled").field(&gateway.describe()).finish()
            }
            InferenceBackend::Disabled { reason } => {
                f.debug_struct("Disabled").field("reason", reason).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Service {
            status: 429,
            message: "Rate limit reached".to_string(),
        };
        assert_eq!(err.to_string(), "Service error (429): Rate limit reached");
        assert_eq!(GatewayError::Timeout.to_string(), "Timeout");
    }

    #[test]
    fn test_tool_calls_assistant_turn() {
        let completion = Completion::ToolCallsRequested {
            text: None,
            calls: vec![ToolCallRequest::new("c1", "get_categories", "{}")],
        };
        let turn = completion.assistant_turn();
        assert_eq!(turn.tool_calls().len(), 1);
        assert_eq!(completion.kind(), "tool_calls");
    }

    #[test]
    fn test_disabled_backend_debug() {
        let backend = InferenceBackend::disabled("no endpoint");
        assert!(!backend.is_enabled());
        assert!(format!("{:?}", backend).contains("no endpoint"));
    }
}
