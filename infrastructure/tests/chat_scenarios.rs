//! End-to-end chat runs: scripted model, real executor, in-memory repository.

use async_trait::async_trait;
use expense_application::{
    Completion, ConversationEvent, ConversationLogger, GatewayError, InferenceBackend,
    LlmGateway, ProcessMessageInput, ProcessMessageUseCase,
};
use expense_domain::{
    Conversation, ExpenseId, ExpenseRepository, ExpenseStatus, HistoryMessage, ToolCallRequest,
    ToolCatalog, Turn,
};
use expense_infrastructure::{ExpenseToolExecutor, InMemoryExpenseRepository};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned completions and keeps every conversation it was sent.
struct ScriptedModel {
    script: Mutex<VecDeque<Completion>>,
    seen: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedModel {
    fn new(script: Vec<Completion>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<Vec<Turn>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedModel {
    async fn complete(
        &self,
        conversation: &Conversation,
        catalog: &ToolCatalog,
    ) -> Result<Completion, GatewayError> {
        assert_eq!(catalog.len(), 7);
        self.seen.lock().unwrap().push(conversation.turns().to_vec());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GatewayError::Other("script exhausted".into()))
    }
}

#[derive(Default)]
struct MemoryLogger {
    events: Mutex<Vec<&'static str>>,
}

impl ConversationLogger for MemoryLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}

fn calls(calls: &[(&str, &str, &str)]) -> Completion {
    Completion::ToolCallsRequested {
        text: None,
        calls: calls
            .iter()
            .map(|(id, name, args)| ToolCallRequest::new(*id, *name, *args))
            .collect(),
    }
}

fn answer(text: &str) -> Completion {
    Completion::FinalAnswer {
        text: text.to_string(),
    }
}

fn use_case(
    model: Arc<ScriptedModel>,
    repo: Arc<InMemoryExpenseRepository>,
) -> ProcessMessageUseCase {
    ProcessMessageUseCase::new(
        InferenceBackend::enabled(model),
        Arc::new(ExpenseToolExecutor::new(repo)),
    )
}

fn tool_payload(turn: &Turn) -> Value {
    match turn {
        Turn::ToolResult { text, .. } => serde_json::from_str(text).unwrap(),
        other => panic!("expected tool result, got {other:?}"),
    }
}

#[tokio::test]
async fn pending_expenses_are_listed_from_the_repository() {
    let repo = Arc::new(InMemoryExpenseRepository::with_demo_data());
    let model = ScriptedModel::new(vec![
        calls(&[("call_1", "get_pending_expenses", "{}")]),
        answer("You have **2** expenses awaiting approval."),
    ]);
    let logger = Arc::new(MemoryLogger::default());

    let reply = use_case(model.clone(), repo)
        .with_conversation_logger(logger.clone())
        .process_message(ProcessMessageInput::new("What is waiting for approval?"))
        .await;

    assert!(reply.success);
    assert_eq!(reply.text, "You have **2** expenses awaiting approval.");

    let requests = model.requests();
    assert_eq!(requests.len(), 2);
    let second = &requests[1];
    assert_eq!(second.len(), 4);
    let rows = tool_payload(&second[3]);
    let ids: Vec<_> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["expenseId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);

    assert_eq!(
        *logger.events.lock().unwrap(),
        vec![
            "chat_request",
            "llm_completion",
            "tool_call",
            "tool_result",
            "llm_completion",
            "chat_response"
        ]
    );
}

#[tokio::test]
async fn created_expense_is_persisted_as_draft() {
    let repo = Arc::new(InMemoryExpenseRepository::with_demo_data());
    let model = ScriptedModel::new(vec![
        calls(&[(
            "call_7",
            "create_expense",
            r#"{"categoryId":1,"amount":"45.20","expenseDate":"2024-02-03","description":"Train to Leeds"}"#,
        )]),
        answer("Created expense **5** for £45.20."),
    ]);

    let reply = use_case(model.clone(), repo.clone())
        .process_message(
            ProcessMessageInput::new("Log £45.20 for my train to Leeds on 3 Feb")
                .with_history(vec![HistoryMessage::user("hello"), HistoryMessage::assistant("Hi!")]),
        )
        .await;
    assert!(reply.success);

    let created = repo.get_expense(ExpenseId(5)).await.unwrap().unwrap();
    assert_eq!(created.status, ExpenseStatus::Draft);
    assert_eq!(created.amount.pence(), 4_520);
    assert_eq!(created.category_name, "Travel");

    let requests = model.requests();
    let result = tool_payload(requests[1].last().unwrap());
    assert_eq!(result["success"], true);
    assert_eq!(result["expenseId"], 5);
}

#[tokio::test]
async fn failed_tool_call_is_fed_back_and_run_continues() {
    let repo = Arc::new(InMemoryExpenseRepository::with_demo_data());
    let model = ScriptedModel::new(vec![
        calls(&[
            ("a", "approve_expense", r#"{"expenseId":3}"#),
            ("b", "reject_expense", r#"{"expenseId":2}"#),
        ]),
        answer("Expense 3 was already approved; expense 2 is now rejected."),
    ]);

    let reply = use_case(model.clone(), repo.clone())
        .process_message(ProcessMessageInput::new("approve 3 and reject 2"))
        .await;
    assert!(reply.success);

    let turns = &model.requests()[1];
    let first = tool_payload(&turns[turns.len() - 2]);
    let second = tool_payload(&turns[turns.len() - 1]);
    assert_eq!(first["success"], false);
    assert_eq!(first["code"], "EXECUTION_FAILED");
    assert_eq!(second["status"], "Rejected");

    let rejected = repo.get_expense(ExpenseId(2)).await.unwrap().unwrap();
    assert_eq!(rejected.status, ExpenseStatus::Rejected);
}

#[tokio::test]
async fn unknown_tool_does_not_touch_the_repository() {
    let repo = Arc::new(InMemoryExpenseRepository::with_demo_data());
    let model = ScriptedModel::new(vec![
        calls(&[("x", "delete_all_expenses", "{}")]),
        answer("I can't do that."),
    ]);

    let reply = use_case(model.clone(), repo.clone())
        .process_message(ProcessMessageInput::new("delete everything"))
        .await;
    assert!(reply.success);

    let turns = &model.requests()[1];
    let payload = tool_payload(turns.last().unwrap());
    assert_eq!(payload["error"], "Unknown function: delete_all_expenses");
    assert_eq!(
        repo.list_expenses(&Default::default()).await.unwrap().len(),
        4
    );
}
