//! Prompt domain
//!
//! The system prompt sent at the start of every conversation and the fixed
//! texts returned to callers when no model answer is available.

pub mod assistant;
pub mod replies;

pub use assistant::AssistantPromptTemplate;
