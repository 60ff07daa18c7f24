//! The fixed expense tool catalog offered to the model on every call.

use super::entities::{RiskLevel, ToolCatalog, ToolDefinition, ToolParameter};
use std::sync::LazyLock;

/// Tool names, as the model sees them.
pub mod names {
    pub const GET_EXPENSES: &str = "get_expenses";
    pub const GET_PENDING_EXPENSES: &str = "get_pending_expenses";
    pub const GET_EXPENSE_SUMMARY: &str = "get_expense_summary";
    pub const GET_CATEGORIES: &str = "get_categories";
    pub const CREATE_EXPENSE: &str = "create_expense";
    pub const APPROVE_EXPENSE: &str = "approve_expense";
    pub const REJECT_EXPENSE: &str = "reject_expense";
}

static EXPENSE_TOOLS: LazyLock<ToolCatalog> = LazyLock::new(build_catalog);

/// Process-wide expense tool catalog.
pub fn expense_tool_catalog() -> &'static ToolCatalog {
    &EXPENSE_TOOLS
}

fn build_catalog() -> ToolCatalog {
    ToolCatalog::new()
        .register(
            ToolDefinition::new(
                names::GET_EXPENSES,
                "Retrieves all expenses from the database with optional filters for status and category",
                RiskLevel::Low,
            )
            .with_parameter(ToolParameter::new(
                "statusFilter",
                "Filter by status: Draft, Submitted, Approved, or Rejected",
                false,
            ))
            .with_parameter(ToolParameter::new(
                "categoryFilter",
                "Filter by category: Travel, Meals, Supplies, Accommodation, or Other",
                false,
            )),
        )
        .register(ToolDefinition::new(
            names::GET_PENDING_EXPENSES,
            "Retrieves all expenses that are pending approval (status = Submitted)",
            RiskLevel::Low,
        ))
        .register(ToolDefinition::new(
            names::GET_EXPENSE_SUMMARY,
            "Gets a summary of expenses grouped by status with counts and totals",
            RiskLevel::Low,
        ))
        .register(ToolDefinition::new(
            names::GET_CATEGORIES,
            "Gets the list of available expense categories",
            RiskLevel::Low,
        ))
        .register(
            ToolDefinition::new(
                names::CREATE_EXPENSE,
                "Creates a new expense record",
                RiskLevel::High,
            )
            .with_parameter(
                ToolParameter::new(
                    "categoryId",
                    "Category ID (1=Travel, 2=Meals, 3=Supplies, 4=Accommodation, 5=Other)",
                    true,
                )
                .with_type("integer"),
            )
            .with_parameter(ToolParameter::new("amount", "Amount in GBP", true).with_type("number"))
            .with_parameter(ToolParameter::new(
                "expenseDate",
                "Date of expense in YYYY-MM-DD format",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "description",
                "Description of the expense",
                false,
            )),
        )
        .register(
            ToolDefinition::new(
                names::APPROVE_EXPENSE,
                "Approves an expense by its ID",
                RiskLevel::High,
            )
            .with_parameter(
                ToolParameter::new("expenseId", "The ID of the expense to approve", true)
                    .with_type("integer"),
            ),
        )
        .register(
            ToolDefinition::new(
                names::REJECT_EXPENSE,
                "Rejects an expense by its ID",
                RiskLevel::High,
            )
            .with_parameter(
                ToolParameter::new("expenseId", "The ID of the expense to reject", true)
                    .with_type("integer"),
            ),
        )
}
