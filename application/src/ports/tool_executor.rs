//! Tool Executor port
//!
//! Defines the interface for dispatching model-requested tool calls.

use async_trait::async_trait;
use expense_domain::{ToolCallRequest, ToolCatalog, ToolOutcome};

/// Port for tool execution
///
/// `execute` never fails: unknown tools, bad arguments and repository
/// errors all come back as a failed [`ToolOutcome`].
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Catalog offered to the model
    fn catalog(&self) -> &ToolCatalog;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.catalog().contains(name)
    }

    /// Execute one tool call
    async fn execute(&self, call: &ToolCallRequest) -> ToolOutcome;
}
