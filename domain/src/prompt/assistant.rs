//! Prompt templates for the expense assistant

use crate::tool::entities::ToolCatalog;

/// Marker appended to tools that change persisted records.
const CHANGES_DATA: &str = "(changes data)";

/// Templates for the assistant's fixed behavioral prompt
pub struct AssistantPromptTemplate;

impl AssistantPromptTemplate {
    /// System prompt: role, tool inventory and output formatting rules.
    pub fn system(catalog: &ToolCatalog) -> String {
        let tool_lines = catalog
            .all()
            .map(|t| {
                if t.is_mutating() {
                    format!("- {}: {} {}", t.name, t.description, CHANGES_DATA)
                } else {
                    format!("- {}: {}", t.name, t.description)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are an AI assistant for the Expense Management System. You help users view, create, approve and reject expenses.

You have access to the following functions:
{tool_lines}

Always call a function to fetch current data instead of guessing.
Only call functions marked {CHANGES_DATA} when the user has clearly asked for that change.

When listing expenses, show for each one:
- Date (DD/MM/YYYY format)
- Category
- Amount (in GBP with the £ symbol)
- Status
- Description

Be helpful and concise. Use markdown numbered lists (1. 2. 3.) or bullets (- or *) for lists.
Use **bold** for important information such as totals or status."#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::catalog::expense_tool_catalog;

    #[test]
    fn test_system_prompt_lists_every_tool() {
        let catalog = expense_tool_catalog();
        let prompt = AssistantPromptTemplate::system(catalog);
        for name in catalog.names() {
            assert!(prompt.contains(&format!("- {}: ", name)), "missing {name}");
        }
        assert!(prompt.contains("DD/MM/YYYY"));
        assert!(prompt.contains("£"));
    }

    #[test]
    fn test_write_tools_are_marked() {
        let prompt = AssistantPromptTemplate::system(expense_tool_catalog());
        let marked: Vec<_> = prompt
            .lines()
            .filter(|line| line.starts_with("- ") && line.ends_with(CHANGES_DATA))
            .collect();
        assert_eq!(marked.len(), 3);
        assert!(marked.iter().any(|l| l.starts_with("- approve_expense: ")));
        assert!(!marked.iter().any(|l| l.starts_with("- get_categories: ")));
    }
}
