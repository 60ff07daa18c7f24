//! Tool domain entities

use serde::{Deserialize, Serialize};

/// Risk level of a tool operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk - read-only lookups (e.g., get_expenses, get_categories)
    Low,
    /// High risk - operations that change persisted state (e.g., approve_expense)
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
        }
    }

    pub fn is_mutating(&self) -> bool {
        matches!(self, RiskLevel::High)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a tool the model may call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "get_expenses")
    pub name: String,
    /// Human-readable description, sent to the model verbatim
    pub description: String,
    /// Risk level of this tool
    pub risk_level: RiskLevel,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name, as it appears in the argument object
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// JSON type hint ("string", "integer", "number", "boolean")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            risk_level,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn is_mutating(&self) -> bool {
        self.risk_level.is_mutating()
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// Ordered catalog of tools, unique by name.
///
/// Built once at startup and shared read-only. Registering a name twice
/// replaces the earlier definition in place, so names stay unique and
/// ordering stays stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level() {
        assert!(!RiskLevel::Low.is_mutating());
        assert!(RiskLevel::High.is_mutating());
        assert_eq!(RiskLevel::High.to_string(), "high");
    }

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("approve_expense", "Approve", RiskLevel::High)
            .with_parameter(
                ToolParameter::new("expenseId", "The expense", true).with_type("integer"),
            )
            .with_parameter(ToolParameter::new("note", "Optional note", false));

        assert!(tool.is_mutating());
        assert_eq!(tool.parameters.len(), 2);
        assert_eq!(tool.parameters[0].param_type, "integer");
        assert_eq!(tool.parameters[1].param_type, "string");
        let required: Vec<_> = tool.required_parameters().map(|p| p.name.as_str()).collect();
        assert_eq!(required, vec!["expenseId"]);
    }

    #[test]
    fn test_catalog_keeps_order_and_unique_names() {
        let catalog = ToolCatalog::new()
            .register(ToolDefinition::new("b", "first b", RiskLevel::Low))
            .register(ToolDefinition::new("a", "a", RiskLevel::Low))
            .register(ToolDefinition::new("b", "second b", RiskLevel::High));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(catalog.get("b").unwrap().description, "second b");
        assert!(catalog.contains("a"));
        assert!(!catalog.contains("c"));
    }
}
