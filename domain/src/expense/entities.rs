//! Expense domain entities

use super::value_objects::{Amount, CategoryId, ExpenseId, ExpenseStatus, UserId};
use crate::core::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Currency every expense is recorded in.
pub const DEFAULT_CURRENCY: &str = "GBP";

/// A single expense claim with denormalized user/category/reviewer names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub status: ExpenseStatus,
    pub amount: Amount,
    pub currency: String,
    pub expense_date: NaiveDate,
    pub description: Option<String>,
    pub receipt_file: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<UserId>,
    pub reviewer_name: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn is_editable(&self) -> bool {
        self.status == ExpenseStatus::Draft
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role_id: i64,
    pub role_name: String,
    pub manager_id: Option<UserId>,
    pub manager_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Count and total of expenses sharing one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub status_name: String,
    pub expense_count: usize,
    pub total_amount: Amount,
}

/// Data required to create an expense. New expenses always start as drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub amount: Amount,
    pub expense_date: NaiveDate,
    pub description: Option<String>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_amount(self.amount)
    }
}

/// Replacement values for an existing draft expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    pub expense_id: ExpenseId,
    pub category_id: CategoryId,
    pub amount: Amount,
    pub expense_date: NaiveDate,
    pub description: Option<String>,
}

impl ExpenseUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_amount(self.amount)
    }
}

fn validate_amount(amount: Amount) -> Result<(), DomainError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(DomainError::InvalidExpense(
            "Amount must be greater than zero.".to_string(),
        ))
    }
}

/// Optional filters for listing expenses. Names match case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub user_id: Option<UserId>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        let status_ok = self
            .status
            .as_deref()
            .is_none_or(|s| expense.status.as_str().eq_ignore_ascii_case(s.trim()));
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| expense.category_name.eq_ignore_ascii_case(c.trim()));
        let user_ok = self.user_id.is_none_or(|u| expense.user_id == u);
        status_ok && category_ok && user_ok
    }
}
