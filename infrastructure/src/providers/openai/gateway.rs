//! Chat-completions [`LlmGateway`] adapter over HTTPS.

use super::config::{ApiFlavor, OpenAiConfig};
use super::convert;
use super::types::Response;
use crate::tools::JsonSchemaToolConverter;
use async_trait::async_trait;
use expense_application::{Completion, GatewayError, LlmGateway, ToolSchemaPort};
use expense_domain::{Conversation, ToolCatalog};
use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Gateway speaking the (Azure) OpenAI chat-completions API with tool calling.
///
/// Stateless apart from the HTTP client: each call posts the whole
/// conversation and the full tool catalog. Failures are not retried.
pub struct OpenAiChatGateway {
    config: OpenAiConfig,
    client: reqwest::Client,
    tool_schema: Arc<dyn ToolSchemaPort>,
}

impl OpenAiChatGateway {
    /// Build the gateway and its HTTP client.
    pub fn new(config: OpenAiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Connection(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            client,
            tool_schema: Arc::new(JsonSchemaToolConverter),
        })
    }

    pub fn with_tool_schema(mut self, tool_schema: Arc<dyn ToolSchemaPort>) -> Self {
        self.tool_schema = tool_schema;
        self
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Authentication and content headers for the configured flavor.
    fn default_headers(&self) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        if let Some(key) = &self.config.api_key {
            let (name, value) = match self.config.flavor {
                ApiFlavor::Azure => ("api-key", key.clone()),
                ApiFlavor::OpenAi => ("authorization", format!("Bearer {key}")),
            };
            headers.insert(
                name,
                HeaderValue::from_str(&value)
                    .map_err(|_| GatewayError::Auth("API key contains invalid header characters".into()))?,
            );
        }

        Ok(headers)
    }

    fn map_send_error(e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_connect() {
            GatewayError::Connection(e.to_string())
        } else {
            GatewayError::Other(e.to_string())
        }
    }
}

#[async_trait]
impl LlmGateway for OpenAiChatGateway {
    #[instrument(skip_all, fields(deployment = %self.config.deployment, turns = conversation.len()))]
    async fn complete(
        &self,
        conversation: &Conversation,
        catalog: &ToolCatalog,
    ) -> Result<Completion, GatewayError> {
        let tools = self.tool_schema.catalog_schema(catalog);
        let body = convert::build_request(conversation, tools, &self.config);

        let response = self
            .client
            .post(self.config.completions_url())
            .headers(self.default_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        let text = response.text().await.map_err(Self::map_send_error)?;
        if !status.is_success() {
            debug!(status = status.as_u16(), "Completion request failed");
            return Err(convert::convert_error(status.as_u16(), &text));
        }

        let api_response: Response = serde_json::from_str(&text).map_err(|e| {
            GatewayError::ResponseFormat(format!("failed to parse completion response: {e}"))
        })?;
        convert::convert_response(api_response)
    }

    fn describe(&self) -> String {
        format!("{}:{}", self.config.flavor, self.config.deployment)
    }
}
