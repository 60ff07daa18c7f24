//! REPL (Read-Eval-Print Loop) for interactive chat

use super::session::ChatSession;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use expense_application::{ChatReply, NoChatProgress, ProcessMessageUseCase};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use tokio_util::sync::CancellationToken;

const HISTORY_CAPACITY: usize = 500;

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: ProcessMessageUseCase,
    session: ChatSession,
    show_progress: bool,
    json: bool,
}

impl ChatRepl {
    pub fn new(use_case: ProcessMessageUseCase) -> Self {
        let session = ChatSession::new().with_recording(use_case.is_enabled());
        Self {
            use_case,
            session,
            show_progress: true,
            json: false,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Print replies as JSON
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    fn line_editor() -> Reedline {
        let editor = Reedline::create();
        let history = dirs::data_dir()
            .map(|p| p.join("expense-assistant").join("chat_history.txt"))
            .and_then(|path| {
                if let Some(parent) = path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                FileBackedHistory::with_file(HISTORY_CAPACITY, path).ok()
            });
        match history {
            Some(history) => editor.with_history(Box::new(history)),
            None => editor,
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = Self::line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("expenses".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }
                    self.process_message(line).await;
                }
                Signal::CtrlC => continue,
                _ => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Expense Assistant - Chat Mode        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if !self.use_case.is_enabled() {
            println!(
                "{}",
                "The assistant is not configured; replies will explain how to enable it."
                    .yellow()
            );
            println!();
        }
        println!("Commands:");
        println!("  {}     - Show this help", "/help".cyan());
        println!("  {}  - Show the conversation so far", "/history".cyan());
        println!("  {}    - Clear conversation history", "/clear".cyan());
        println!("  {}     - Exit chat", "/exit".cyan());
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            "/exit" | "/quit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?     - Show this help");
                println!("  /history          - Show the conversation so far");
                println!("  /clear            - Clear conversation history");
                println!("  /exit, /quit, /q  - Exit chat");
                println!();
                false
            }
            "/history" => {
                println!();
                print!("{}", ConsoleFormatter::format_history(self.session.history()));
                println!();
                false
            }
            "/clear" => {
                let count = self.session.exchanges();
                self.session.clear();
                println!(
                    "{}",
                    format!("Conversation history cleared ({} exchanges).", count).green()
                );
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&mut self, message: &str) {
        println!();

        // Ctrl+C while a request is in flight cancels that request only.
        let token = CancellationToken::new();
        let watcher = tokio::spawn({
            let token = token.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            }
        });

        let use_case = self.use_case.clone().with_cancellation(token);
        let input = self.session.input(message);
        let reply: ChatReply = if self.show_progress {
            let progress = ProgressReporter::new();
            use_case.execute(input, &progress).await
        } else {
            use_case.execute(input, &NoChatProgress).await
        };
        watcher.abort();

        if self.json {
            println!("{}", ConsoleFormatter::format_json(&reply));
        } else {
            println!("{}", ConsoleFormatter::format_reply(&reply));
        }
        println!();

        self.session.record(message, &reply);
    }
}
