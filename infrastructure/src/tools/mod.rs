//! Expense tool adapters
//!
//! - [`ExpenseToolExecutor`]: dispatches decoded calls into an
//!   [`ExpenseRepository`](expense_domain::ExpenseRepository)
//! - [`JsonSchemaToolConverter`]: renders the catalog as function-calling schema

mod executor;
mod schema;

pub use executor::ExpenseToolExecutor;
pub use schema::JsonSchemaToolConverter;
