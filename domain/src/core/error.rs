//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A turn was appended that would break conversation ordering
    #[error("Invalid conversation: {0}")]
    InvalidConversation(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
}
