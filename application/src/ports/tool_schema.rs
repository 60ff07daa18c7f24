//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how to serialize them for the
//! API" (infrastructure).

use expense_domain::{ToolCatalog, ToolDefinition};

/// Port for converting tool definitions to the inference API's function format.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to a JSON Schema function entry.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert the whole catalog, preserving catalog order.
    fn catalog_schema(&self, catalog: &ToolCatalog) -> Vec<serde_json::Value> {
        catalog.all().map(|t| self.tool_to_schema(t)).collect()
    }
}
