//! Console output formatter for chat replies

use colored::Colorize;
use expense_application::ChatReply;
use expense_domain::HistoryMessage;

/// Formats chat replies for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Reply text for stdout. Failed runs get the diagnostic underneath.
    pub fn format_reply(reply: &ChatReply) -> String {
        if reply.success {
            return reply.text.clone();
        }
        match &reply.error {
            Some(error) => format!(
                "{}\n{}",
                reply.text.yellow(),
                format!("({})", error).dimmed()
            ),
            None => reply.text.yellow().to_string(),
        }
    }

    /// The reply in its wire shape: `{"response", "success", "error"?}`.
    pub fn format_json(reply: &ChatReply) -> String {
        serde_json::to_string_pretty(reply).unwrap_or_else(|e| {
            serde_json::json!({
                "response": reply.text,
                "success": false,
                "error": e.to_string(),
            })
            .to_string()
        })
    }

    /// Numbered transcript for the REPL's `/history` command.
    pub fn format_history(history: &[HistoryMessage]) -> String {
        if history.is_empty() {
            return "No conversation history.".dimmed().to_string();
        }

        let mut output = String::new();
        for (i, message) in history.iter().enumerate() {
            let role = match message.role.as_str() {
                "user" => "You".cyan().bold(),
                _ => "Assistant".green().bold(),
            };
            output.push_str(&format!(
                "{:>3}. {}: {}\n",
                i + 1,
                role,
                expense_domain::util::truncate_str(&message.content, 200)
            ));
        }
        output
    }
}
