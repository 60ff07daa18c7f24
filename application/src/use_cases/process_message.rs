//! Process Message use case.
//!
//! Turns one user message (plus caller-held history) into a reply by driving
//! the tool-calling loop:
//!
//! 1. No inference backend → fixed unavailable notice (`success: true`)
//! 2. Empty message → prompt for input (`success: false`)
//! 3. Seed the conversation: system prompt, user/assistant history, message
//! 4. Ask the model; on tool calls, dispatch them in order, append one
//!    result per call, ask again
//! 5. Stop on a final answer, or abort once `max_tool_rounds` is exceeded
//!
//! Tool failures are conversation content. Only gateway failures, the round
//! ceiling and cancellation abort a run, and even then the caller receives a
//! well-formed [`ChatReply`].

use crate::config::ChatParams;
use crate::ports::chat_progress::{ChatProgressNotifier, NoChatProgress};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{Completion, GatewayError, InferenceBackend, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::shared::check_cancelled;
use expense_domain::prompt::replies;
use expense_domain::util::truncate_str;
use expense_domain::{
    AssistantPromptTemplate, Conversation, DomainError, HistoryMessage, ToolCallRequest,
    ToolOutcome,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Reasons a run is aborted.
#[derive(Error, Debug)]
pub enum ProcessMessageError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("max tool rounds exceeded ({0})")]
    ToolRoundsExceeded(usize),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Conversation error: {0}")]
    Conversation(#[from] DomainError),
}

impl ProcessMessageError {
    /// Caller-facing text; diagnostic detail stays in the error field.
    pub fn user_text(&self) -> String {
        match self {
            ProcessMessageError::ToolRoundsExceeded(max) => replies::tool_rounds_exceeded(*max),
            _ => replies::GENERIC_APOLOGY.to_string(),
        }
    }
}

/// Input for the [`ProcessMessageUseCase`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessMessageInput {
    pub message: String,
    /// Prior turns held by the caller; only user/assistant roles are used.
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
}

impl ProcessMessageInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryMessage>) -> Self {
        self.history = history;
        self
    }
}

/// Result of one run, shaped for an HTTP layer to return verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(rename = "response")]
    pub text: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatReply {
    pub fn answered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
            error: None,
        }
    }

    pub fn rejected(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
            error: None,
        }
    }

    pub fn failed(text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Use case driving the chat assistant's tool-calling loop.
#[derive(Clone)]
pub struct ProcessMessageUseCase {
    backend: InferenceBackend,
    tool_executor: Arc<dyn ToolExecutorPort>,
    params: ChatParams,
    system_prompt: String,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl ProcessMessageUseCase {
    pub fn new(backend: InferenceBackend, tool_executor: Arc<dyn ToolExecutorPort>) -> Self {
        let system_prompt = AssistantPromptTemplate::system(tool_executor.catalog());
        Self {
            backend,
            tool_executor,
            params: ChatParams::default(),
            system_prompt,
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: ChatParams) -> Self {
        self.params = params;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Abort in-flight and future rounds when the token is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_enabled()
    }

    /// Run without progress callbacks.
    pub async fn process_message(&self, input: ProcessMessageInput) -> ChatReply {
        self.execute(input, &NoChatProgress).await
    }

    /// Run with progress callbacks. Never fails; errors become a failed reply.
    pub async fn execute(
        &self,
        input: ProcessMessageInput,
        progress: &dyn ChatProgressNotifier,
    ) -> ChatReply {
        let gateway = match &self.backend {
            InferenceBackend::Enabled(gateway) => gateway.clone(),
            InferenceBackend::Disabled { reason } => {
                debug!(reason = %reason, "Inference disabled, returning unavailable notice");
                return ChatReply::answered(replies::SERVICE_UNAVAILABLE);
            }
        };

        if input.message.trim().is_empty() {
            return ChatReply::rejected(replies::EMPTY_MESSAGE);
        }

        info!(
            history = input.history.len(),
            "Processing chat message: {}",
            truncate_str(&input.message, 100)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "chat_request",
            json!({
                "message": input.message,
                "history_len": input.history.len(),
                "model": gateway.describe(),
            }),
        ));

        let conversation =
            Conversation::seeded(self.system_prompt.clone(), input.history, input.message);

        match self.run_loop(gateway.as_ref(), conversation, progress).await {
            Ok((text, rounds)) => {
                info!(rounds, "Chat completed");
                progress.on_answer(&text);
                self.conversation_logger.log(ConversationEvent::new(
                    "chat_response",
                    json!({ "rounds": rounds, "bytes": text.len(), "text": text }),
                ));
                ChatReply::answered(text)
            }
            Err(e) => {
                warn!(error = %e, "Chat run aborted");
                let detail = e.to_string();
                progress.on_aborted(&detail);
                self.conversation_logger.log(ConversationEvent::new(
                    "chat_aborted",
                    json!({ "error": detail }),
                ));
                ChatReply::failed(e.user_text(), detail)
            }
        }
    }

    /// The bounded loop. Returns the final text and the number of tool rounds used.
    async fn run_loop(
        &self,
        gateway: &dyn LlmGateway,
        mut conversation: Conversation,
        progress: &dyn ChatProgressNotifier,
    ) -> Result<(String, usize), ProcessMessageError> {
        let max_rounds = self.params.max_tool_rounds;
        let mut rounds = 0usize;

        loop {
            check_cancelled(&self.cancellation_token)?;
            progress.on_model_request(rounds + 1);

            let completion = self.complete_cancellable(gateway, &conversation).await?;
            self.conversation_logger.log(ConversationEvent::new(
                "llm_completion",
                json!({
                    "round": rounds,
                    "kind": completion.kind(),
                    "turns_sent": conversation.len(),
                }),
            ));

            let calls = match &completion {
                Completion::FinalAnswer { text } => {
                    return Ok((final_text(Some(text.clone())), rounds));
                }
                Completion::ToolCallsRequested { text, calls } if calls.is_empty() => {
                    return Ok((final_text(text.clone()), rounds));
                }
                Completion::ToolCallsRequested { calls, .. } => calls.clone(),
            };

            rounds += 1;
            if rounds > max_rounds {
                warn!(max_rounds, "Model kept requesting tools past the round limit");
                return Err(ProcessMessageError::ToolRoundsExceeded(max_rounds));
            }

            debug!(
                round = rounds,
                max_rounds,
                calls = calls.len(),
                "Dispatching tool calls"
            );
            conversation.push_assistant(completion.assistant_turn())?;

            for call in &calls {
                check_cancelled(&self.cancellation_token)?;
                let outcome = self.dispatch(call, progress).await?;
                conversation.push_tool_result(&call.id, outcome.to_turn_text())?;
            }
        }
    }

    async fn complete_cancellable(
        &self,
        gateway: &dyn LlmGateway,
        conversation: &Conversation,
    ) -> Result<Completion, ProcessMessageError> {
        let catalog = self.tool_executor.catalog();
        let result = if let Some(token) = &self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ProcessMessageError::Cancelled),
                result = gateway.complete(conversation, catalog) => result,
            }
        } else {
            gateway.complete(conversation, catalog).await
        };
        Ok(result?)
    }

    async fn dispatch(
        &self,
        call: &ToolCallRequest,
        progress: &dyn ChatProgressNotifier,
    ) -> Result<ToolOutcome, ProcessMessageError> {
        progress.on_tool_call(&call.tool_name, &call.raw_arguments);
        self.conversation_logger.log(ConversationEvent::new(
            "tool_call",
            json!({
                "id": call.id,
                "tool": call.tool_name,
                "arguments": call.raw_arguments,
            }),
        ));

        let outcome = if let Some(token) = &self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ProcessMessageError::Cancelled),
                outcome = self.tool_executor.execute(call) => outcome,
            }
        } else {
            self.tool_executor.execute(call).await
        };

        if !outcome.is_ok() {
            debug!(
                tool = %call.tool_name,
                error = outcome.error_message().unwrap_or("unknown"),
                "Tool call failed, returning error to model"
            );
        }
        progress.on_tool_result(&call.tool_name, outcome.is_ok(), outcome.duration_ms);
        self.conversation_logger.log(ConversationEvent::new(
            "tool_result",
            json!({
                "id": call.id,
                "tool": call.tool_name,
                "success": outcome.is_ok(),
                "duration_ms": outcome.duration_ms,
                "payload": outcome.payload,
            }),
        ));
        Ok(outcome)
    }
}

fn final_text(text: Option<String>) -> String {
    match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => replies::EMPTY_COMPLETION.to_string(),
    }
}
