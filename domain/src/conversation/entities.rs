//! The append-only conversation owned by one orchestration run.

use super::turn::{HistoryMessage, ToolCallRequest, Turn};
use crate::core::error::DomainError;
use std::collections::HashSet;

/// Ordered sequence of turns sent to the inference endpoint.
///
/// Turns can only be appended. Tool results are accepted only when they
/// answer a still-unresolved call of the immediately preceding assistant
/// turn, so a conversation built through this API is always valid to send
/// upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Seed a conversation: system prompt, filtered history, then the new user message.
    pub fn seeded(
        system_prompt: impl Into<String>,
        history: impl IntoIterator<Item = HistoryMessage>,
        message: impl Into<String>,
    ) -> Self {
        let mut turns = vec![Turn::system(system_prompt)];
        turns.extend(history.into_iter().filter_map(HistoryMessage::into_turn));
        turns.push(Turn::user(message));
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append an assistant turn.
    ///
    /// Rejected when the previous assistant turn still has unanswered calls
    /// or when the new turn repeats a call id.
    pub fn push_assistant(&mut self, turn: Turn) -> Result<(), DomainError> {
        if !matches!(turn, Turn::Assistant { .. }) {
            return Err(DomainError::InvalidConversation(format!(
                "expected an assistant turn, got '{}'",
                turn.role()
            )));
        }
        if self.has_pending_tool_calls() {
            return Err(DomainError::InvalidConversation(
                "previous tool calls are still unresolved".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for call in turn.tool_calls() {
            if !seen.insert(call.id.as_str()) {
                return Err(DomainError::InvalidConversation(format!(
                    "duplicate tool call id '{}'",
                    call.id
                )));
            }
        }

        self.turns.push(turn);
        Ok(())
    }

    /// Append the result of a pending tool call.
    pub fn push_tool_result(
        &mut self,
        call_id: &str,
        text: impl Into<String>,
    ) -> Result<(), DomainError> {
        if !self.pending_tool_calls().iter().any(|c| c.id == call_id) {
            return Err(DomainError::InvalidConversation(format!(
                "tool result for '{}' has no pending call",
                call_id
            )));
        }
        self.turns.push(Turn::tool_result(call_id, text));
        Ok(())
    }

    /// Calls of the last assistant turn that have no tool result yet.
    ///
    /// Empty when anything other than tool results follows that turn.
    pub fn pending_tool_calls(&self) -> Vec<&ToolCallRequest> {
        let Some(idx) = self
            .turns
            .iter()
            .rposition(|t| matches!(t, Turn::Assistant { .. }))
        else {
            return Vec::new();
        };

        let mut resolved = HashSet::new();
        for turn in &self.turns[idx + 1..] {
            match turn {
                Turn::ToolResult { call_id, .. } => {
                    resolved.insert(call_id.as_str());
                }
                _ => return Vec::new(),
            }
        }

        self.turns[idx]
            .tool_calls()
            .iter()
            .filter(|c| !resolved.contains(c.id.as_str()))
            .collect()
    }

    pub fn has_pending_tool_calls(&self) -> bool {
        !self.pending_tool_calls().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_calls() -> Turn {
        Turn::assistant_with_calls(
            None,
            vec![
                ToolCallRequest::new("a", "get_categories", "{}"),
                ToolCallRequest::new("b", "get_expense_summary", ""),
            ],
        )
    }

    #[test]
    fn test_seeded_layout() {
        let conv = Conversation::seeded(
            "system",
            vec![
                HistoryMessage::user("hi"),
                HistoryMessage::new("system", "ignored"),
                HistoryMessage::assistant("hello"),
            ],
            "list my pending expenses",
        );

        assert_eq!(
            conv.turns(),
            &[
                Turn::system("system"),
                Turn::user("hi"),
                Turn::assistant("hello"),
                Turn::user("list my pending expenses"),
            ]
        );
        assert!(!conv.has_pending_tool_calls());
    }

    #[test]
    fn test_tool_results_resolve_pending_calls() {
        let mut conv = Conversation::seeded("s", vec![], "m");
        conv.push_assistant(two_calls()).unwrap();
        assert_eq!(conv.pending_tool_calls().len(), 2);

        conv.push_tool_result("a", "[]").unwrap();
        let pending = conv.pending_tool_calls();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "b");

        conv.push_tool_result("b", "[]").unwrap();
        assert!(!conv.has_pending_tool_calls());
        assert_eq!(conv.len(), 5);
    }

    #[test]
    fn test_tool_result_without_pending_call_is_rejected() {
        let mut conv = Conversation::seeded("s", vec![], "m");
        assert!(conv.push_tool_result("a", "[]").is_err());

        conv.push_assistant(two_calls()).unwrap();
        conv.push_tool_result("a", "[]").unwrap();
        // already resolved
        assert!(conv.push_tool_result("a", "[]").is_err());
        // unknown id
        assert!(conv.push_tool_result("zzz", "[]").is_err());
        assert_eq!(conv.len(), 4);
    }

    #[test]
    fn test_assistant_rejected_while_calls_pending() {
        let mut conv = Conversation::seeded("s", vec![], "m");
        conv.push_assistant(two_calls()).unwrap();
        let err = conv.push_assistant(Turn::assistant("done")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidConversation(_)));
    }

    #[test]
    fn test_duplicate_call_ids_rejected() {
        let mut conv = Conversation::seeded("s", vec![], "m");
        let turn = Turn::assistant_with_calls(
            None,
            vec![
                ToolCallRequest::new("x", "get_categories", "{}"),
                ToolCallRequest::new("x", "get_categories", "{}"),
            ],
        );
        assert!(conv.push_assistant(turn).is_err());
        assert_eq!(conv.len(), 2);
    }

    #[test]
    fn test_only_assistant_turns_accepted() {
        let mut conv = Conversation::seeded("s", vec![], "m");
        assert!(conv.push_assistant(Turn::user("sneaky")).is_err());
    }
}
