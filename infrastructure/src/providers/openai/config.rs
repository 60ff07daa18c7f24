//! Connection settings for the chat-completions gateway.

use crate::config::FileAssistantConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which dialect of the chat-completions API the endpoint speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFlavor {
    /// Azure OpenAI: deployment in the path, `api-key` header, `api-version` query.
    #[default]
    Azure,
    /// OpenAI-compatible: `/chat/completions`, bearer token, model in the body.
    OpenAi,
}

impl fmt::Display for ApiFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFlavor::Azure => write!(f, "azure"),
            ApiFlavor::OpenAi => write!(f, "openai"),
        }
    }
}

/// Resolved gateway settings.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub endpoint: String,
    pub deployment: String,
    pub api_key: Option<String>,
    pub api_version: String,
    pub flavor: ApiFlavor,
    pub timeout: Duration,
    pub temperature: Option<f32>,
}

impl OpenAiConfig {
    /// `None` when no endpoint is configured.
    pub fn from_file_config(config: &FileAssistantConfig) -> Option<Self> {
        let endpoint = config.endpoint()?;
        Some(Self {
            endpoint: endpoint.to_string(),
            deployment: config.deployment.trim().to_string(),
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            api_version: config.api_version.clone(),
            flavor: config.flavor,
            timeout: Duration::from_secs(config.timeout_seconds),
            temperature: config.temperature,
        })
    }

    /// Full URL for the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        match self.flavor {
            ApiFlavor::Azure => format!(
                "{base}/openai/deployments/{}/chat/completions?api-version={}",
                self.deployment, self.api_version
            ),
            ApiFlavor::OpenAi => format!("{base}/chat/completions"),
        }
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_version", &self.api_version)
            .field("flavor", &self.flavor)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config(endpoint: Option<&str>, flavor: ApiFlavor) -> FileAssistantConfig {
        FileAssistantConfig {
            endpoint: endpoint.map(str::to_string),
            api_key: Some("secret-key".to_string()),
            flavor,
            ..FileAssistantConfig::default()
        }
    }

    #[test]
    fn test_missing_endpoint_yields_none() {
        assert!(OpenAiConfig::from_file_config(&file_config(None, ApiFlavor::Azure)).is_none());
        assert!(
            OpenAiConfig::from_file_config(&file_config(Some(""), ApiFlavor::Azure)).is_none()
        );
    }

    #[test]
    fn test_azure_url() {
        let config = OpenAiConfig::from_file_config(&file_config(
            Some("https://res.openai.azure.com/"),
            ApiFlavor::Azure,
        ))
        .unwrap();
        assert_eq!(
            config.completions_url(),
            "https://res.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-06-01"
        );
    }

    #[test]
    fn test_openai_url() {
        let config = OpenAiConfig::from_file_config(&file_config(
            Some("https://api.openai.com/v1"),
            ApiFlavor::OpenAi,
        ))
        .unwrap();
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = OpenAiConfig::from_file_config(&file_config(
            Some("https://api.openai.com/v1"),
            ApiFlavor::OpenAi,
        ))
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
