//! Typed decoding of model-supplied tool arguments.
//!
//! Raw arguments arrive as a JSON string. [`ExpenseToolCall::decode`] turns
//! them into one variant per catalog entry, applying these rules:
//!
//! - an empty string means `{}`
//! - anything other than a JSON object is rejected
//! - required parameters must be present; extra fields are ignored
//! - ids accept integers or integral numeric strings
//! - `expenseDate` must be present, but a `null` or unparseable value falls
//!   back to `today`

use super::catalog::{expense_tool_catalog, names};
use super::traits::{DefaultToolValidator, ToolValidator};
use super::value_objects::ToolError;
use crate::expense::value_objects::{Amount, CategoryId, ExpenseId};
use chrono::NaiveDate;
use serde_json::{Map, Value};

type Args = Map<String, Value>;

/// A decoded, validated call to one of the expense tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseToolCall {
    GetExpenses {
        status_filter: Option<String>,
        category_filter: Option<String>,
    },
    GetPendingExpenses,
    GetExpenseSummary,
    GetCategories,
    CreateExpense {
        category_id: CategoryId,
        amount: Amount,
        expense_date: NaiveDate,
        description: Option<String>,
    },
    ApproveExpense {
        expense_id: ExpenseId,
    },
    RejectExpense {
        expense_id: ExpenseId,
    },
}

impl ExpenseToolCall {
    pub fn decode(tool_name: &str, raw_arguments: &str, today: NaiveDate) -> Result<Self, ToolError> {
        let definition = expense_tool_catalog()
            .get(tool_name)
            .ok_or_else(|| ToolError::unknown_function(tool_name))?;

        let args = parse_object(raw_arguments)?;
        DefaultToolValidator.validate(&args, definition)?;

        let call = match tool_name {
            names::GET_EXPENSES => ExpenseToolCall::GetExpenses {
                status_filter: optional_string(&args, "statusFilter")?,
                category_filter: optional_string(&args, "categoryFilter")?,
            },
            names::GET_PENDING_EXPENSES => ExpenseToolCall::GetPendingExpenses,
            names::GET_EXPENSE_SUMMARY => ExpenseToolCall::GetExpenseSummary,
            names::GET_CATEGORIES => ExpenseToolCall::GetCategories,
            names::CREATE_EXPENSE => ExpenseToolCall::CreateExpense {
                category_id: CategoryId(integer(&args, "categoryId")?),
                amount: Amount::positive_from_json(field(&args, "amount"))
                    .map_err(|e| ToolError::invalid_argument(e.to_string()))?,
                expense_date: lenient_date(field(&args, "expenseDate"), today),
                description: optional_string(&args, "description")?,
            },
            names::APPROVE_EXPENSE => ExpenseToolCall::ApproveExpense {
                expense_id: ExpenseId(integer(&args, "expenseId")?),
            },
            names::REJECT_EXPENSE => ExpenseToolCall::RejectExpense {
                expense_id: ExpenseId(integer(&args, "expenseId")?),
            },
            other => return Err(ToolError::unknown_function(other)),
        };
        Ok(call)
    }

    pub fn tool_name(&self) -> &'static str {
        match self {
            ExpenseToolCall::GetExpenses { .. } => names::GET_EXPENSES,
            ExpenseToolCall::GetPendingExpenses => names::GET_PENDING_EXPENSES,
            ExpenseToolCall::GetExpenseSummary => names::GET_EXPENSE_SUMMARY,
            ExpenseToolCall::GetCategories => names::GET_CATEGORIES,
            ExpenseToolCall::CreateExpense { .. } => names::CREATE_EXPENSE,
            ExpenseToolCall::ApproveExpense { .. } => names::APPROVE_EXPENSE,
            ExpenseToolCall::RejectExpense { .. } => names::REJECT_EXPENSE,
        }
    }
}

fn field<'a>(args: &'a Args, key: &str) -> &'a Value {
    static NULL: Value = Value::Null;
    args.get(key).unwrap_or(&NULL)
}

fn parse_object(raw: &str) -> Result<Args, ToolError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Args::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ToolError::invalid_argument(
            "arguments must be a JSON object",
        )),
        Err(e) => Err(ToolError::invalid_argument(format!(
            "arguments are not valid JSON: {}",
            e
        ))),
    }
}

/// Absent, `null` and blank strings all mean "not given".
fn optional_string(args: &Args, key: &str) -> Result<Option<String>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(other) => Err(ToolError::invalid_argument(format!(
            "'{}' must be a string, got {}",
            key, other
        ))),
    }
}

fn integer(args: &Args, key: &str) -> Result<i64, ToolError> {
    let invalid = || ToolError::invalid_argument(format!("'{}' must be an integer", key));
    match args.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(invalid),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn lenient_date(value: &Value, today: NaiveDate) -> NaiveDate {
    value
        .as_str()
        .map(str::trim)
        .and_then(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| s.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
        })
        .unwrap_or(today)
}
