//! Application layer for expense-assistant
//!
//! This crate contains the chat orchestration use case, port definitions and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ChatParams, DEFAULT_MAX_TOOL_ROUNDS};
pub use ports::{
    chat_progress::{ChatProgressNotifier, NoChatProgress},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{Completion, GatewayError, InferenceBackend, LlmGateway},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::process_message::{
    ChatReply, ProcessMessageError, ProcessMessageInput, ProcessMessageUseCase,
};
