//! Chat progress port.
//!
//! [`ChatProgressNotifier`] is an **output port** the presentation layer
//! implements to show what the assistant is doing while a run is in flight.
//! Every callback has a no-op default.

/// Progress callbacks for one orchestration run.
pub trait ChatProgressNotifier: Send + Sync {
    /// Called before each request to the model (1-based)
    fn on_model_request(&self, _request: usize) {}

    /// Called when a tool is about to be dispatched
    fn on_tool_call(&self, _tool_name: &str, _raw_arguments: &str) {}

    /// Called when a tool returns
    fn on_tool_result(&self, _tool_name: &str, _success: bool, _duration_ms: Option<u64>) {}

    /// Called once the model produced its final answer
    fn on_answer(&self, _text: &str) {}

    /// Called when the run is aborted
    fn on_aborted(&self, _reason: &str) {}
}

/// Progress notifier that ignores every event.
pub struct NoChatProgress;

impl ChatProgressNotifier for NoChatProgress {}
