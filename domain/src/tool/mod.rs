//! Tool domain module
//!
//! Defines the **Tool Registry** side of the assistant: the fixed catalog of
//! backend operations the model may call, how their arguments are decoded,
//! and what a dispatched call produces.
//!
//! ```text
//! ┌──────────────┐    ┌─────────────────┐    ┌──────────────┐
//! │ ToolCatalog  │───▶│ ExpenseToolCall │───▶│ ToolOutcome  │
//! │ (registry)   │    │ (decoded args)  │    │ (payload)    │
//! └──────────────┘    └─────────────────┘    └──────────────┘
//! ```
//!
//! # Risk Levels
//!
//! | Risk | Tools |
//! |------|-------|
//! | **Low** | `get_expenses`, `get_pending_expenses`, `get_expense_summary`, `get_categories` |
//! | **High** | `create_expense`, `approve_expense`, `reject_expense` |
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions and decoding, no I/O
//! - **Application** (`ToolExecutorPort`): port trait for tool execution
//! - **Infrastructure** (`ExpenseToolExecutor`): dispatch into an `ExpenseRepository`

pub mod arguments;
pub mod catalog;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use arguments::ExpenseToolCall;
pub use catalog::{expense_tool_catalog, names};
pub use entities::{RiskLevel, ToolCatalog, ToolDefinition, ToolParameter};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{OutcomeStatus, ToolError, ToolOutcome};
