//! (Azure) OpenAI chat-completions provider.
//!
//! One adapter serves both API dialects; [`ApiFlavor`] only changes the URL
//! layout and the authentication header.

mod config;
mod convert;
mod gateway;
mod types;

pub use config::{ApiFlavor, OpenAiConfig};
pub use gateway::OpenAiChatGateway;

use crate::config::FileAssistantConfig;
use expense_application::InferenceBackend;
use std::sync::Arc;
use tracing::{info, warn};

/// Decide inference availability once, at startup.
///
/// A missing endpoint or an HTTP client that cannot be built yields
/// [`InferenceBackend::Disabled`]; chat then answers with a fixed notice.
pub fn connect_backend(config: &FileAssistantConfig) -> InferenceBackend {
    let Some(openai_config) = OpenAiConfig::from_file_config(config) else {
        warn!("No assistant endpoint configured; chat assistant is disabled");
        return InferenceBackend::disabled("assistant.endpoint is not configured");
    };

    if openai_config.api_key.is_none() {
        warn!("No assistant api_key configured; requests will be sent without credentials");
    }

    match OpenAiChatGateway::new(openai_config) {
        Ok(gateway) => {
            info!(
                endpoint = %gateway.config().endpoint,
                deployment = %gateway.config().deployment,
                flavor = %gateway.config().flavor,
                "Chat assistant enabled"
            );
            InferenceBackend::enabled(Arc::new(gateway))
        }
        Err(e) => {
            warn!(error = %e, "Could not initialise inference client; chat assistant is disabled");
            InferenceBackend::disabled(e.to_string())
        }
    }
}
