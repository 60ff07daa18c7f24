//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! [assistant]
//! endpoint = "https://my-resource.openai.azure.com"
//! deployment = "gpt-4o"
//! api_key = "..."
//! flavor = "azure"          # or "openai"
//! max_tool_rounds = 8
//!
//! [demo]
//! user_id = 1
//! reviewer_id = 2
//!
//! [logging]
//! conversation_log = "logs/chat.jsonl"
//! ```

use crate::providers::openai::ApiFlavor;
use expense_application::DEFAULT_MAX_TOOL_ROUNDS;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("assistant.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("assistant.max_tool_rounds cannot be 0")]
    InvalidMaxToolRounds,

    #[error("assistant.endpoint must start with http:// or https:// (got '{0}')")]
    InvalidEndpoint(String),

    #[error("assistant.deployment cannot be empty")]
    EmptyDeployment,
}

/// Raw `[assistant]` section: inference endpoint and loop limits
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAssistantConfig {
    /// Endpoint base URL; absent or blank disables the assistant
    pub endpoint: Option<String>,
    /// Deployment (Azure) or model (OpenAI) name
    pub deployment: String,
    pub api_key: Option<String>,
    /// Azure `api-version` query parameter
    pub api_version: String,
    pub flavor: ApiFlavor,
    pub timeout_seconds: u64,
    pub max_tool_rounds: usize,
    pub temperature: Option<f32>,
}

impl Default for FileAssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            deployment: "gpt-4o".to_string(),
            api_key: None,
            api_version: "2024-06-01".to_string(),
            flavor: ApiFlavor::default(),
            timeout_seconds: 60,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            temperature: None,
        }
    }
}

impl FileAssistantConfig {
    /// Trimmed endpoint, `None` when unset or blank.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

impl fmt::Debug for FileAssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAssistantConfig")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_version", &self.api_version)
            .field("flavor", &self.flavor)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_tool_rounds", &self.max_tool_rounds)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Raw `[demo]` section: fixed identities used by mutating tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDemoConfig {
    /// Owner of expenses created through the assistant
    pub user_id: i64,
    /// Reviewer recorded on approve/reject
    pub reviewer_id: i64,
}

impl Default for FileDemoConfig {
    fn default() -> Self {
        Self {
            user_id: 1,
            reviewer_id: 2,
        }
    }
}

/// Raw `[logging]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript path; unset disables transcript logging
    pub conversation_log: Option<String>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub assistant: FileAssistantConfig,
    pub demo: FileDemoConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let assistant = &self.assistant;
        if assistant.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if assistant.max_tool_rounds == 0 {
            return Err(ConfigValidationError::InvalidMaxToolRounds);
        }
        if assistant.deployment.trim().is_empty() {
            return Err(ConfigValidationError::EmptyDeployment);
        }
        if let Some(endpoint) = assistant.endpoint()
            && !(endpoint.starts_with("https://") || endpoint.starts_with("http://"))
        {
            return Err(ConfigValidationError::InvalidEndpoint(endpoint.to_string()));
        }
        Ok(())
    }

    /// Copy with secrets masked, for `--show-config`.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.assistant.api_key.is_some() {
            copy.assistant.api_key = Some("[REDACTED]".to_string());
        }
        copy
    }
}
