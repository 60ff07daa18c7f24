//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for expense-assistant
#[derive(Parser, Debug)]
#[command(name = "expense-assistant")]
#[command(author, version, about = "Chat assistant for the expense tracker")]
#[command(long_about = r#"
Ask questions about expenses in plain language. The assistant calls the
expense tools (list, summarise, create, approve, reject) on your behalf and
answers with the results.

Configuration files are loaded from (in priority order):
1. --config <path>                             Explicit config file
2. ./expense-assistant.toml                    Project-level config
3. ~/.config/expense-assistant/config.toml     Global config
Environment variables (EXPENSE_ASSISTANT_ASSISTANT__ENDPOINT, ...) override files.

Example:
  expense-assistant "What expenses are waiting for approval?"
  expense-assistant --json "Summarise my expenses by status"
  expense-assistant --chat
"#)]
pub struct Cli {
    /// The message to send (not required in chat mode)
    pub message: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and effective settings, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Maximum number of tool-call rounds per message
    #[arg(long, value_name = "N")]
    pub max_tool_rounds: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the reply as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write operational logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Append the chat transcript (JSONL) to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}
