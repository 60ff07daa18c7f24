//! Expense repository adapters.

mod memory;

pub use memory::InMemoryExpenseRepository;
