//! Domain layer for expense-assistant
//!
//! This crate contains the core entities, value objects and pure logic.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Conversation**: append-only list of turns for one chat request
//! - **Tool catalog**: the fixed set of expense operations the model may call
//! - **Expense**: the records those tools read and change, behind
//!   [`ExpenseRepository`]

pub mod conversation;
pub mod core;
pub mod expense;
pub mod prompt;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use conversation::{Conversation, HistoryMessage, ToolCallRequest, Turn};
pub use core::error::DomainError;
pub use expense::{
    Amount, Category, CategoryId, DEFAULT_CURRENCY, Expense, ExpenseFilter, ExpenseId,
    ExpenseRepository, ExpenseStatus, ExpenseSummary, ExpenseUpdate, NewExpense,
    RepositoryError, User, UserId,
};
pub use prompt::AssistantPromptTemplate;
pub use tool::{
    DefaultToolValidator, ExpenseToolCall, OutcomeStatus, RiskLevel, ToolCatalog,
    ToolDefinition, ToolError, ToolOutcome, ToolParameter, ToolValidator, expense_tool_catalog,
};
