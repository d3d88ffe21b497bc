use crate::{Command, Result};
use language_service::Reply;
use nav_dispatch::{GoalDispatcher, TaskMonitor, TaskOutcome, TaskResult};
use tracing::{info, warn};

/// Drives one operator turn: validates the language service's reply,
/// dispatches a navigation goal when asked, supervises it, and renders the
/// outcome as response text. Errors never escape this boundary; they are
/// turned into operator-facing messages so the session keeps running.
pub struct IntentRouter {
    dispatcher: GoalDispatcher,
    monitor: TaskMonitor,
}

impl IntentRouter {
    pub fn new(dispatcher: GoalDispatcher, monitor: TaskMonitor) -> Self {
        Self {
            dispatcher,
            monitor,
        }
    }

    /// Handle one reply from the language service. Plain content passes
    /// through verbatim; function calls are validated and executed.
    pub async fn handle(&self, reply: Reply) -> String {
        match reply {
            Reply::Content(text) => text,
            Reply::FunctionCall(call) => match self.run_call(&call).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(name = %call.name, "command rejected: {e}");
                    format!("Error: {e}")
                }
            },
        }
    }

    async fn run_call(&self, call: &language_service::FunctionCall) -> Result<String> {
        match Command::from_call(call)? {
            Command::Navigate(goal) => {
                let handle = self.dispatcher.dispatch(&goal).await?;
                let result = self
                    .monitor
                    .await_completion(handle, |feedback| {
                        info!("Feedback: {}", feedback.message);
                    })
                    .await?;
                Ok(render_result(&result))
            }
        }
    }
}

fn render_result(result: &TaskResult) -> String {
    match result.outcome {
        TaskOutcome::Succeeded => "Navigation task completed!".to_string(),
        TaskOutcome::Failed => match &result.last_feedback {
            Some(feedback) => format!("Navigation task failed (last report: {}).", feedback.message),
            None => "Navigation task failed.".to_string(),
        },
        TaskOutcome::Cancelled => "Navigation task was cancelled.".to_string(),
    }
}
