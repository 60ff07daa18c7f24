//! Interactive chat module
//!
//! Provides a line-editor based chat interface that keeps the running
//! user/assistant history and resubmits it with every message.

mod repl;
mod session;

pub use repl::ChatRepl;
pub use session::ChatSession;
