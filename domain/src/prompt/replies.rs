//! Fixed caller-facing reply texts.

/// Returned (with `success: true`) when no inference endpoint is configured.
pub const SERVICE_UNAVAILABLE: &str = "The AI chat service is not currently deployed. \
To enable AI-powered chat, configure an inference endpoint for the assistant \
(see the [assistant] section of expense-assistant.toml). Until then, you can still \
manage expenses through the main interface.";

/// Returned for an empty or whitespace-only message.
pub const EMPTY_MESSAGE: &str = "Please provide a message.";

/// Used when the model finishes without any text.
pub const EMPTY_COMPLETION: &str = "I couldn't generate a response.";

/// Caller-facing text for any aborted run; details go in the error field.
pub const GENERIC_APOLOGY: &str =
    "I encountered an error processing your request. Please try again.";

/// Caller-facing text when the model keeps requesting tools past the round limit.
pub fn tool_rounds_exceeded(max_rounds: usize) -> String {
    format!(
        "I wasn't able to complete that request within {} tool steps. \
         Please try rephrasing or narrowing it.",
        max_rounds
    )
}
