//! Tool domain traits
//!
//! Contains pure domain logic traits for argument validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::ToolDefinition;
use super::value_objects::ToolError;
use serde_json::{Map, Value};

/// Validator for decoded tool arguments
///
/// This is a pure domain trait that checks an argument object against a
/// tool definition without any I/O operations.
pub trait ToolValidator {
    fn validate(
        &self,
        arguments: &Map<String, Value>,
        definition: &ToolDefinition,
    ) -> Result<(), ToolError>;
}

/// Default implementation of ToolValidator
///
/// Required parameters must be present (an explicit `null` counts as present
/// so per-field leniency rules can apply). Extra arguments are ignored.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(
        &self,
        arguments: &Map<String, Value>,
        definition: &ToolDefinition,
    ) -> Result<(), ToolError> {
        for param in definition.required_parameters() {
            if !arguments.contains_key(&param.name) {
                return Err(ToolError::invalid_argument(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                )));
            }
        }
        Ok(())
    }
}
