//! Expense domain
//!
//! Entities and value objects of the expense tracker plus the
//! [`ExpenseRepository`] contract the tool dispatcher calls into.

pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::{
    Category, DEFAULT_CURRENCY, Expense, ExpenseFilter, ExpenseSummary, ExpenseUpdate, NewExpense,
    User,
};
pub use repository::{ExpenseRepository, RepositoryError};
pub use value_objects::{Amount, CategoryId, ExpenseId, ExpenseStatus, UserId};
