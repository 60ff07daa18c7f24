//! Tool domain value objects — immutable outcome and error types
//!
//! Every dispatched tool call produces a [`ToolOutcome`]. Failures are data:
//! the error payload is handed back to the model as an ordinary tool result
//! so it can correct itself or explain the problem to the user.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Error that occurred while decoding or executing a tool call.
///
/// | Code | Description |
/// |------|-------------|
/// | `NOT_FOUND` | Unknown tool name |
/// | `INVALID_ARGUMENT` | Missing or malformed argument |
/// | `EXECUTION_FAILED` | The repository refused or failed the operation |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "INVALID_ARGUMENT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub const NOT_FOUND: &'static str = "NOT_FOUND";
    pub const INVALID_ARGUMENT: &'static str = "INVALID_ARGUMENT";
    pub const EXECUTION_FAILED: &'static str = "EXECUTION_FAILED";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::new(
            Self::NOT_FOUND,
            format!("Unknown function: {}", name.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_ARGUMENT, message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(Self::EXECUTION_FAILED, message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Whether a tool call did what was asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Ok,
    Failed,
}

/// Result of executing one tool call.
///
/// Both variants carry a JSON payload that becomes the text of the matching
/// tool result turn; success or failure is visible inside the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub status: OutcomeStatus,
    pub payload: Value,
    /// Wall-clock dispatch time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ToolOutcome {
    pub fn ok(payload: Value) -> Self {
        Self {
            status: OutcomeStatus::Ok,
            payload,
            duration_ms: None,
        }
    }

    /// Failure payload: `{"success": false, "error": <message>, "code": <code>}`.
    pub fn failed(error: &ToolError) -> Self {
        let mut payload = json!({
            "success": false,
            "error": error.message,
            "code": error.code,
        });
        if let Some(details) = &error.details {
            payload["details"] = Value::String(details.clone());
        }
        Self {
            status: OutcomeStatus::Failed,
            payload,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == OutcomeStatus::Ok
    }

    /// Serialized payload used as tool result text.
    pub fn to_turn_text(&self) -> String {
        self.payload.to_string()
    }

    /// Error message of a failed outcome.
    pub fn error_message(&self) -> Option<&str> {
        match self.status {
            OutcomeStatus::Ok => None,
            OutcomeStatus::Failed => self.payload.get("error").and_then(Value::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_function_error() {
        let err = ToolError::unknown_function("delete_everything");
        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(err.message, "Unknown function: delete_everything");
        assert_eq!(
            err.to_string(),
            "[NOT_FOUND] Unknown function: delete_everything"
        );
    }

    #[test]
    fn test_failed_outcome_payload() {
        let err = ToolError::invalid_argument("missing required argument 'expenseId'")
            .with_details("approve_expense");
        let outcome = ToolOutcome::failed(&err);

        assert!(!outcome.is_ok());
        assert_eq!(outcome.payload["success"], false);
        assert_eq!(outcome.payload["code"], "INVALID_ARGUMENT");
        assert_eq!(outcome.payload["details"], "approve_expense");
        assert_eq!(
            outcome.error_message(),
            Some("missing required argument 'expenseId'")
        );
    }

    #[test]
    fn test_ok_outcome_text() {
        let outcome = ToolOutcome::ok(json!({"success": true, "expenseId": 5})).with_duration(3);
        assert!(outcome.is_ok());
        assert_eq!(outcome.duration_ms, Some(3));
        assert_eq!(outcome.error_message(), None);

        let parsed: Value = serde_json::from_str(&outcome.to_turn_text()).unwrap();
        assert_eq!(parsed["expenseId"], 5);
    }
}
