//! Conversion between domain conversations and the chat-completions wire format.

use super::config::OpenAiConfig;
use super::types::{
    ErrorResponse, FunctionCallRequest, Message, Request, Response, ToolCallRequest,
};
use expense_application::{Completion, GatewayError};
use expense_domain::{Conversation, ToolCallRequest as DomainToolCall, Turn};
use serde_json::Value;
use tracing::debug;

/// Build the request body for one completion call.
pub(crate) fn build_request<'a>(
    conversation: &'a Conversation,
    tools: Vec<Value>,
    config: &'a OpenAiConfig,
) -> Request<'a> {
    let tool_choice = (!tools.is_empty()).then_some("auto");
    Request {
        model: &config.deployment,
        messages: conversation.turns().iter().map(turn_to_message).collect(),
        temperature: config.temperature,
        tools,
        tool_choice,
    }
}

fn turn_to_message(turn: &Turn) -> Message<'_> {
    match turn {
        Turn::System { text } | Turn::User { text } => Message {
            role: turn.role(),
            content: Some(text.as_str()),
            tool_calls: None,
            tool_call_id: None,
        },
        Turn::Assistant { text, tool_calls } => Message {
            role: "assistant",
            content: text.as_deref(),
            tool_calls: (!tool_calls.is_empty()).then(|| {
                tool_calls
                    .iter()
                    .map(|call| ToolCallRequest {
                        id: &call.id,
                        call_type: "function",
                        function: FunctionCallRequest {
                            name: &call.tool_name,
                            arguments: &call.raw_arguments,
                        },
                    })
                    .collect()
            }),
            tool_call_id: None,
        },
        Turn::ToolResult { call_id, text } => Message {
            role: "tool",
            content: Some(text.as_str()),
            tool_calls: None,
            tool_call_id: Some(call_id.as_str()),
        },
    }
}

/// Map the first choice of a response to a [`Completion`].
pub(crate) fn convert_response(response: Response) -> Result<Completion, GatewayError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::ResponseFormat("response contained no choices".into()))?;

    debug!(
        finish_reason = choice.finish_reason.as_deref().unwrap_or("none"),
        "Received completion"
    );

    let message = choice.message;
    let calls: Vec<DomainToolCall> = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| {
            DomainToolCall::new(
                tc.id,
                tc.function.name,
                tc.function.arguments.unwrap_or_default(),
            )
        })
        .collect();

    if calls.is_empty() {
        Ok(Completion::FinalAnswer {
            text: message.content.unwrap_or_default(),
        })
    } else {
        Ok(Completion::ToolCallsRequested {
            text: message.content.filter(|t| !t.is_empty()),
            calls,
        })
    }
}

/// Map a non-success HTTP status and body to a [`GatewayError`].
pub(crate) fn convert_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                "no response body".to_string()
            } else {
                body.chars().take(500).collect()
            }
        });

    match status {
        401 | 403 => GatewayError::Auth(message),
        _ => GatewayError::Service { status, message },
    }
}
