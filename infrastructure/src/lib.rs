//! Infrastructure layer for expense-assistant
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the chat-completions gateway, the expense tool
//! executor, the in-memory repository, configuration loading and the JSONL
//! transcript logger.

pub mod config;
pub mod logging;
pub mod providers;
pub mod repository;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAssistantConfig, FileConfig, FileDemoConfig,
    FileLoggingConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{ApiFlavor, OpenAiChatGateway, OpenAiConfig, connect_backend};
pub use repository::InMemoryExpenseRepository;
pub use tools::{ExpenseToolExecutor, JsonSchemaToolConverter};
