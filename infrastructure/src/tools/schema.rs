//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces the
//! chat-completions `tools` array entries.

use expense_application::ToolSchemaPort;
use expense_domain::ToolDefinition;

/// Default implementation producing function-calling JSON Schema.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"string"` → `"string"`
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            let mut prop = serde_json::Map::new();
            prop.insert("type".to_string(), serde_json::json!(schema_type));
            prop.insert(
                "description".to_string(),
                serde_json::json!(param.description),
            );
            properties.insert(param.name.clone(), serde_json::Value::Object(prop));

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expense_domain::{RiskLevel, ToolParameter, expense_tool_catalog};

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("create_expense", "Creates a new expense record", RiskLevel::High)
            .with_parameter(
                ToolParameter::new("categoryId", "Category ID", true).with_type("integer"),
            )
            .with_parameter(ToolParameter::new("amount", "Amount in GBP", true).with_type("number"))
            .with_parameter(ToolParameter::new("description", "Description", false));

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["type"], "function");
        let function = &schema["function"];
        assert_eq!(function["name"], "create_expense");
        assert_eq!(function["description"], "Creates a new expense record");
        assert_eq!(function["parameters"]["type"], "object");

        let props = &function["parameters"]["properties"];
        assert_eq!(props["categoryId"]["type"], "integer");
        assert_eq!(props["amount"]["type"], "number");
        assert_eq!(props["description"]["type"], "string");
        assert_eq!(props["amount"]["description"], "Amount in GBP");

        let required = function["parameters"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
        assert_eq!(required[0], "categoryId");
        assert_eq!(required[1], "amount");
    }

    #[test]
    fn test_parameterless_tool_has_empty_object_schema() {
        let schema = JsonSchemaToolConverter.tool_to_schema(&ToolDefinition::new(
            "get_categories",
            "Gets the list of available expense categories",
            RiskLevel::Low,
        ));
        let params = &schema["function"]["parameters"];
        assert_eq!(params["type"], "object");
        assert!(params["properties"].as_object().unwrap().is_empty());
        assert!(params["required"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_catalog_schema_keeps_catalog_order() {
        let tools = JsonSchemaToolConverter.catalog_schema(expense_tool_catalog());
        assert_eq!(tools.len(), 7);
        assert_eq!(tools[0]["function"]["name"], "get_expenses");
        assert_eq!(tools[6]["function"]["name"], "reject_expense");
    }
}
