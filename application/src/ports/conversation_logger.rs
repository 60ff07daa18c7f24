//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording the transcript of a
//! chat run (request, model completions, tool calls and results, final reply).
//!
//! This is separate from `tracing`-based operation logs: tracing carries
//! human-readable diagnostics, this port captures a machine-readable
//! transcript (JSONL).

use serde_json::Value;

/// A structured conversation event.
///
/// Each event has a type string and a JSON payload; the logger adds the
/// timestamp when the record is written.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "chat_request", "tool_call", "chat_response").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events.
///
/// `log` is synchronous and infallible for callers; implementations swallow
/// their own write errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when transcript logging is off.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
