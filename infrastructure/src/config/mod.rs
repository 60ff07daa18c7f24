//! Configuration file loading for expense-assistant
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `EXPENSE_ASSISTANT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./expense-assistant.toml` or `./.expense-assistant.toml`
//! 4. Global: `$XDG_CONFIG_HOME/expense-assistant/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAssistantConfig, FileConfig, FileDemoConfig, FileLoggingConfig,
};
pub use loader::ConfigLoader;
