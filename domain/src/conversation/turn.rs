//! Conversation turns and the caller-supplied history records they are built from.

use serde::{Deserialize, Serialize};

/// A tool invocation requested by the model inside an assistant turn.
///
/// `id` is opaque and only needs to be unique within its assistant turn;
/// it correlates the eventual [`Turn::ToolResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    pub tool_name: String,
    /// Arguments exactly as emitted by the model (a JSON object, usually).
    pub raw_arguments: String,
}

impl ToolCallRequest {
    pub fn new(
        id: impl Into<String>,
        tool_name: impl Into<String>,
        raw_arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            tool_name: tool_name.into(),
            raw_arguments: raw_arguments.into(),
        }
    }
}

/// One message-like unit of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Turn {
    System {
        text: String,
    },
    User {
        text: String,
    },
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCallRequest>,
    },
    ToolResult {
        call_id: String,
        text: String,
    },
}

impl Turn {
    pub fn system(text: impl Into<String>) -> Self {
        Turn::System { text: text.into() }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Turn::User { text: text.into() }
    }

    /// Plain assistant reply without tool calls.
    pub fn assistant(text: impl Into<String>) -> Self {
        Turn::Assistant {
            text: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Assistant turn carrying pending tool calls.
    pub fn assistant_with_calls(text: Option<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
        Turn::Assistant { text, tool_calls }
    }

    pub fn tool_result(call_id: impl Into<String>, text: impl Into<String>) -> Self {
        Turn::ToolResult {
            call_id: call_id.into(),
            text: text.into(),
        }
    }

    /// Wire role name of this turn.
    pub fn role(&self) -> &'static str {
        match self {
            Turn::System { .. } => "system",
            Turn::User { .. } => "user",
            Turn::Assistant { .. } => "assistant",
            Turn::ToolResult { .. } => "tool",
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Turn::System { text } | Turn::User { text } | Turn::ToolResult { text, .. } => {
                Some(text)
            }
            Turn::Assistant { text, .. } => text.as_deref(),
        }
    }

    /// Tool calls carried by an assistant turn (empty for every other kind).
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        match self {
            Turn::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}

/// A prior chat message supplied by the caller.
///
/// Only `user` and `assistant` roles survive into a conversation; anything
/// else (system prompts, tool output) is dropped so callers cannot inject
/// their own instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

impl HistoryMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// Convert into a turn, or `None` when the role is not accepted.
    pub fn into_turn(self) -> Option<Turn> {
        match self.role.as_str() {
            "user" => Some(Turn::user(self.content)),
            "assistant" => Some(Turn::assistant(self.content)),
            _ => None,
        }
    }
}
