//! Expense repository trait
//!
//! The persistence collaborator. Implementations live in the
//! infrastructure layer (an in-memory store ships for demos and tests).

use super::entities::{
    Category, Expense, ExpenseFilter, ExpenseSummary, ExpenseUpdate, NewExpense, User,
};
use super::value_objects::{ExpenseId, ExpenseStatus, UserId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a repository operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Repository of expenses, categories and users.
///
/// Boolean results report whether a record was affected; `false` means the
/// request was understood but nothing changed (unknown id, wrong status).
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, RepositoryError>;

    async fn get_expense(&self, id: ExpenseId) -> Result<Option<Expense>, RepositoryError>;

    /// Create a draft expense and return its id.
    async fn create_expense(&self, expense: NewExpense) -> Result<ExpenseId, RepositoryError>;

    async fn update_expense(&self, update: ExpenseUpdate) -> Result<bool, RepositoryError>;

    async fn delete_expense(&self, id: ExpenseId) -> Result<bool, RepositoryError>;

    async fn submit_expense(&self, id: ExpenseId) -> Result<bool, RepositoryError>;

    async fn approve_expense(
        &self,
        id: ExpenseId,
        reviewer: UserId,
    ) -> Result<bool, RepositoryError>;

    async fn reject_expense(
        &self,
        id: ExpenseId,
        reviewer: UserId,
    ) -> Result<bool, RepositoryError>;

    /// Expenses awaiting a manager decision.
    async fn list_pending_expenses(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Expense>, RepositoryError>;

    /// Active categories only.
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError>;

    async fn list_statuses(&self) -> Result<Vec<ExpenseStatus>, RepositoryError>;

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Counts and totals per status, in lifecycle order.
    async fn expense_summary(
        &self,
        user: Option<UserId>,
    ) -> Result<Vec<ExpenseSummary>, RepositoryError>;
}
