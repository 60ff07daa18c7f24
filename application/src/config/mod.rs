//! Application-level configuration.
//!
//! Types that control how use cases behave, independent of where the values
//! were loaded from.

pub mod chat_params;

pub use chat_params::{ChatParams, DEFAULT_MAX_TOOL_ROUNDS};
