//! Expense tool executor — the concrete implementation of [`ToolExecutorPort`].
//!
//! [`ExpenseToolExecutor`] bridges the application layer's abstract port with
//! an [`ExpenseRepository`]:
//!
//! ```text
//! ToolExecutorPort::execute()
//!   ├─ ExpenseToolCall::decode()   unknown name / bad arguments → failed outcome
//!   └─ dispatch()                  repository call → JSON payload
//! ```
//!
//! Every path produces a [`ToolOutcome`]; nothing here returns an error to the
//! orchestrator.

use async_trait::async_trait;
use chrono::Local;
use expense_application::ToolExecutorPort;
use expense_domain::{
    Expense, ExpenseFilter, ExpenseId, ExpenseRepository, ExpenseToolCall, NewExpense,
    RepositoryError, ToolCallRequest, ToolCatalog, ToolError, ToolOutcome, UserId,
    expense_tool_catalog,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Executor that dispatches expense tool calls into a repository.
///
/// Created expenses belong to `user_id`; approvals and rejections are
/// recorded against `reviewer_id`.
#[derive(Clone)]
pub struct ExpenseToolExecutor {
    repository: Arc<dyn ExpenseRepository>,
    catalog: &'static ToolCatalog,
    user_id: UserId,
    reviewer_id: UserId,
}

impl ExpenseToolExecutor {
    pub fn new(repository: Arc<dyn ExpenseRepository>) -> Self {
        Self {
            repository,
            catalog: expense_tool_catalog(),
            user_id: UserId(1),
            reviewer_id: UserId(2),
        }
    }

    /// Set the acting employee and reviewer.
    pub fn with_identity(mut self, user_id: UserId, reviewer_id: UserId) -> Self {
        self.user_id = user_id;
        self.reviewer_id = reviewer_id;
        self
    }

    async fn dispatch(&self, call: ExpenseToolCall) -> Result<Value, ToolError> {
        match call {
            ExpenseToolCall::GetExpenses {
                status_filter,
                category_filter,
            } => {
                let mut filter = ExpenseFilter::new();
                if let Some(status) = status_filter {
                    filter = filter.with_status(status);
                }
                if let Some(category) = category_filter {
                    filter = filter.with_category(category);
                }
                let expenses = self.repository.list_expenses(&filter).await.map_err(repo_error)?;
                Ok(Value::Array(
                    expenses.iter().map(|e| project_expense(e, true)).collect(),
                ))
            }
            ExpenseToolCall::GetPendingExpenses => {
                let expenses = self
                    .repository
                    .list_pending_expenses(None)
                    .await
                    .map_err(repo_error)?;
                Ok(Value::Array(
                    expenses.iter().map(|e| project_expense(e, false)).collect(),
                ))
            }
            ExpenseToolCall::GetExpenseSummary => {
                let summary = self.repository.expense_summary(None).await.map_err(repo_error)?;
                Ok(Value::Array(
                    summary
                        .iter()
                        .map(|s| {
                            json!({
                                "statusName": s.status_name,
                                "expenseCount": s.expense_count,
                                "totalAmount": s.total_amount,
                            })
                        })
                        .collect(),
                ))
            }
            ExpenseToolCall::GetCategories => {
                let categories = self.repository.list_categories().await.map_err(repo_error)?;
                Ok(Value::Array(
                    categories
                        .iter()
                        .map(|c| json!({"categoryId": c.id, "categoryName": c.name}))
                        .collect(),
                ))
            }
            ExpenseToolCall::CreateExpense {
                category_id,
                amount,
                expense_date,
                description,
            } => {
                let expense_id = self
                    .repository
                    .create_expense(NewExpense {
                        user_id: self.user_id,
                        category_id,
                        amount,
                        expense_date,
                        description,
                    })
                    .await
                    .map_err(repo_error)?;
                Ok(json!({"success": true, "expenseId": expense_id}))
            }
            ExpenseToolCall::ApproveExpense { expense_id } => {
                let affected = self
                    .repository
                    .approve_expense(expense_id, self.reviewer_id)
                    .await
                    .map_err(repo_error)?;
                review_payload(affected, expense_id, "Approved")
            }
            ExpenseToolCall::RejectExpense { expense_id } => {
                let affected = self
                    .repository
                    .reject_expense(expense_id, self.reviewer_id)
                    .await
                    .map_err(repo_error)?;
                review_payload(affected, expense_id, "Rejected")
            }
        }
    }
}

fn project_expense(expense: &Expense, with_status: bool) -> Value {
    let mut value = json!({
        "expenseId": expense.id,
        "userName": expense.user_name,
        "categoryName": expense.category_name,
        "amount": expense.amount,
        "currency": expense.currency,
        "expenseDate": expense.expense_date.format("%Y-%m-%d").to_string(),
        "description": expense.description,
    });
    if with_status {
        value["statusName"] = json!(expense.status.as_str());
    }
    value
}

fn review_payload(affected: bool, expense_id: ExpenseId, status: &str) -> Result<Value, ToolError> {
    if affected {
        Ok(json!({"success": true, "expenseId": expense_id, "status": status}))
    } else {
        Err(ToolError::execution_failed(format!(
            "Expense {expense_id} was not found or is not awaiting approval"
        )))
    }
}

fn repo_error(e: RepositoryError) -> ToolError {
    match e {
        RepositoryError::Validation(message) => ToolError::invalid_argument(message),
        other => ToolError::execution_failed(other.to_string()),
    }
}

#[async_trait]
impl ToolExecutorPort for ExpenseToolExecutor {
    fn catalog(&self) -> &ToolCatalog {
        self.catalog
    }

    async fn execute(&self, call: &ToolCallRequest) -> ToolOutcome {
        let started = Instant::now();
        let today = Local::now().date_naive();

        let result = match ExpenseToolCall::decode(&call.tool_name, &call.raw_arguments, today) {
            Ok(decoded) => self.dispatch(decoded).await,
            Err(e) => Err(e),
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(payload) => {
                let risk = self
                    .catalog
                    .get(&call.tool_name)
                    .map_or("unknown", |t| t.risk_level.as_str());
                info!(tool = %call.tool_name, call_id = %call.id, risk, duration_ms, "Tool call succeeded");
                ToolOutcome::ok(payload).with_duration(duration_ms)
            }
            Err(e) => {
                warn!(tool = %call.tool_name, call_id = %call.id, error = %e, "Tool call failed");
                ToolOutcome::failed(&e).with_duration(duration_ms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryExpenseRepository;

    fn executor() -> (ExpenseToolExecutor, Arc<InMemoryExpenseRepository>) {
        let repo = Arc::new(InMemoryExpenseRepository::with_demo_data());
        (ExpenseToolExecutor::new(repo.clone()), repo)
    }

    async fn run(executor: &ExpenseToolExecutor, name: &str, args: &str) -> ToolOutcome {
        executor
            .execute(&ToolCallRequest::new("call_1", name, args))
            .await
    }

    #[test]
    fn test_executor_has_all_tools() {
        let (executor, _) = executor();
        for name in [
            "get_expenses",
            "get_pending_expenses",
            "get_expense_summary",
            "get_categories",
            "create_expense",
            "approve_expense",
            "reject_expense",
        ] {
            assert!(executor.has_tool(name), "missing {name}");
        }
        assert!(!executor.has_tool("delete_expense"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (executor, _) = executor();
        let outcome = run(&executor, "delete_everything", "{}").await;
        assert!(!outcome.is_ok());
        assert_eq!(outcome.payload["code"], "NOT_FOUND");
        assert_eq!(outcome.payload["error"], "Unknown function: delete_everything");
        assert!(outcome.duration_ms.is_some());
    }

    #[tokio::test]
    async fn test_get_expenses_projection_and_filter() {
        let (executor, _) = executor();
        let outcome = run(&executor, "get_expenses", r#"{"categoryFilter":"Travel"}"#).await;
        assert!(outcome.is_ok());

        let rows = outcome.payload.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["expenseId"], 1);
        assert_eq!(rows[0]["userName"], "Alice Example");
        assert_eq!(rows[0]["amount"], 120.0);
        assert_eq!(rows[0]["currency"], "GBP");
        assert_eq!(rows[0]["expenseDate"], "2024-01-15");
        assert_eq!(rows[0]["statusName"], "Submitted");
    }

    #[tokio::test]
    async fn test_pending_projection_has_no_status() {
        let (executor, _) = executor();
        let outcome = run(&executor, "get_pending_expenses", "").await;
        let rows = outcome.payload.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.get("statusName").is_none()));
    }

    #[tokio::test]
    async fn test_summary_and_categories() {
        let (executor, _) = executor();
        let summary = run(&executor, "get_expense_summary", "{}").await;
        assert_eq!(summary.payload[0]["statusName"], "Submitted");
        assert_eq!(summary.payload[0]["expenseCount"], 2);
        assert_eq!(summary.payload[0]["totalAmount"], 189.0);

        let categories = run(&executor, "get_categories", "{}").await;
        assert_eq!(categories.payload[1], json!({"categoryId": 2, "categoryName": "Meals"}));
    }

    #[tokio::test]
    async fn test_create_expense() {
        let (executor, repo) = executor();
        let outcome = run(
            &executor,
            "create_expense",
            r#"{"categoryId":2,"amount":12.5,"expenseDate":"2024-03-01","description":"Team lunch"}"#,
        )
        .await;
        assert!(outcome.is_ok());
        assert_eq!(outcome.payload, json!({"success": true, "expenseId": 5}));

        let created = repo.get_expense(ExpenseId(5)).await.unwrap().unwrap();
        assert_eq!(created.amount.pence(), 1_250);
        assert_eq!(created.user_id, UserId(1));
        assert_eq!(created.description.as_deref(), Some("Team lunch"));
    }

    #[tokio::test]
    async fn test_create_expense_invalid_arguments() {
        let (executor, _) = executor();
        let missing = run(&executor, "create_expense", r#"{"categoryId":2,"amount":5}"#).await;
        assert_eq!(missing.payload["code"], "INVALID_ARGUMENT");

        let unknown_category = run(
            &executor,
            "create_expense",
            r#"{"categoryId":42,"amount":5,"expenseDate":"2024-03-01"}"#,
        )
        .await;
        assert!(!unknown_category.is_ok());
        assert_eq!(unknown_category.payload["success"], false);
        assert_eq!(unknown_category.payload["code"], "INVALID_ARGUMENT");

        let no_arguments = run(&executor, "approve_expense", "").await;
        assert_eq!(no_arguments.payload["success"], false);
        assert_eq!(no_arguments.payload["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_approve_and_reject() {
        let (executor, repo) = executor();
        let approved = run(&executor, "approve_expense", r#"{"expenseId":1}"#).await;
        assert_eq!(
            approved.payload,
            json!({"success": true, "expenseId": 1, "status": "Approved"})
        );
        let stored = repo.get_expense(ExpenseId(1)).await.unwrap().unwrap();
        assert_eq!(stored.reviewed_by, Some(UserId(2)));

        // Already approved: nothing affected
        let again = run(&executor, "reject_expense", r#"{"expenseId":"1"}"#).await;
        assert!(!again.is_ok());
        assert_eq!(again.payload["code"], "EXECUTION_FAILED");

        let rejected = run(&executor, "reject_expense", r#"{"expenseId":"2"}"#).await;
        assert_eq!(rejected.payload["status"], "Rejected");
    }

    #[tokio::test]
    async fn test_custom_identity() {
        let repo = Arc::new(InMemoryExpenseRepository::with_demo_data());
        let executor =
            ExpenseToolExecutor::new(repo.clone()).with_identity(UserId(2), UserId(1));
        run(&executor, "approve_expense", r#"{"expenseId":2}"#).await;
        let stored = repo.get_expense(ExpenseId(2)).await.unwrap().unwrap();
        assert_eq!(stored.reviewer_name.as_deref(), Some("Alice Example"));
    }
}
