//! Conversation history kept between REPL messages

use expense_application::{ChatReply, ProcessMessageInput};
use expense_domain::HistoryMessage;

/// Prior user/assistant exchanges, replayed as history on each request.
///
/// Only answered exchanges are recorded; a failed run leaves the history
/// untouched so a retry starts from the same context.
#[derive(Debug, Clone)]
pub struct ChatSession {
    history: Vec<HistoryMessage>,
    recording: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            recording: true,
        }
    }

    /// Turn recording off when replies do not come from the model, e.g. the
    /// unavailable notice of an unconfigured assistant.
    pub fn with_recording(mut self, recording: bool) -> Self {
        self.recording = recording;
        self
    }

    pub fn history(&self) -> &[HistoryMessage] {
        &self.history
    }

    /// Number of completed exchanges.
    pub fn exchanges(&self) -> usize {
        self.history.len() / 2
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Build the use case input for `message` with the history so far.
    pub fn input(&self, message: &str) -> ProcessMessageInput {
        ProcessMessageInput::new(message).with_history(self.history.clone())
    }

    pub fn record(&mut self, message: &str, reply: &ChatReply) {
        if !self.recording || !reply.success {
            return;
        }
        self.history.push(HistoryMessage::user(message));
        self.history.push(HistoryMessage::assistant(reply.text.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_grows_with_answered_exchanges() {
        let mut session = ChatSession::new();
        assert!(session.input("hi").history.is_empty());

        session.record("hi", &ChatReply::answered("Hello!"));
        let input = session.input("what is pending?");
        assert_eq!(input.message, "what is pending?");
        assert_eq!(
            input.history,
            vec![HistoryMessage::user("hi"), HistoryMessage::assistant("Hello!")]
        );
        assert_eq!(session.exchanges(), 1);
    }

    #[test]
    fn test_failed_runs_are_not_recorded() {
        let mut session = ChatSession::new();
        session.record("approve 1", &ChatReply::failed("Sorry", "Timeout"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_unavailable_notice_is_not_recorded() {
        let mut session = ChatSession::new().with_recording(false);
        session.record("hi", &ChatReply::answered("The assistant is not configured."));
        assert!(session.history().is_empty());
        assert!(session.input("hi again").history.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut session = ChatSession::new();
        session.record("hi", &ChatReply::answered("Hello!"));
        session.clear();
        assert_eq!(session.exchanges(), 0);
    }
}
