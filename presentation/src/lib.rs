//! Presentation layer for expense-assistant
//!
//! This crate contains CLI definitions, the interactive chat REPL, reply
//! formatting and progress reporters.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ChatSession};
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
