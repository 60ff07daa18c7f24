//! Conversation domain
//!
//! A [`Conversation`] is created fresh for every chat request, seeded with
//! the system prompt, the caller's prior user/assistant messages and the new
//! user message. It then only grows: assistant turns carrying tool calls,
//! followed by exactly one tool result per call.
//!
//! ```text
//! System ─▶ User* / Assistant* ─▶ User ─▶ Assistant{calls} ─▶ ToolResult* ─▶ Assistant{calls} ...
//! ```
//!
//! History is the caller's responsibility; nothing here is persisted.

pub mod entities;
pub mod turn;

pub use entities::Conversation;
pub use turn::{HistoryMessage, ToolCallRequest, Turn};
