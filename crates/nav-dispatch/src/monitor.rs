use crate::dispatcher::{SharedSession, TaskSlot};
use crate::{DispatchError, Result};
use motion_executor::{ExecutorError, Feedback, MotionExecutor, TaskHandle, TaskStatus};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Sleep between completion polls.
    pub poll_interval: Duration,
    /// Optional upper bound on the whole supervision wait. `None` waits
    /// until the executor resolves the task.
    pub deadline: Option<Duration>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            deadline: None,
        }
    }
}

/// Terminal outcome of one navigation task. Failure is data here, not an
/// error; only supervision problems surface as [`DispatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct TaskResult {
    pub outcome: TaskOutcome,
    pub last_feedback: Option<Feedback>,
}

/// Polls one in-flight task to its terminal state.
pub struct TaskMonitor {
    session: SharedSession,
    in_flight: TaskSlot,
    executor: Arc<dyn MotionExecutor>,
    config: MonitorConfig,
}

impl TaskMonitor {
    pub(crate) fn new(
        session: SharedSession,
        in_flight: TaskSlot,
        executor: Arc<dyn MotionExecutor>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            session,
            in_flight,
            executor,
            config,
        }
    }

    /// Poll until the task resolves. Every feedback record the executor
    /// produces is handed to `on_feedback` before the next poll. Supervision
    /// always ends with the session back at active and the in-flight slot
    /// cleared, including on deadline or executor errors, so the next
    /// command can be accepted either way.
    pub async fn await_completion<F>(&self, handle: TaskHandle, mut on_feedback: F) -> Result<TaskResult>
    where
        F: FnMut(&Feedback),
    {
        let result = self.supervise(handle, &mut on_feedback).await;

        self.session.lock().await.task_finished();
        self.in_flight.lock().await.take();
        match &result {
            Ok(resolved) => debug!(%handle, outcome = ?resolved.outcome, "navigation task resolved"),
            Err(e) => warn!(%handle, "task abandoned without a terminal status: {e}"),
        }
        result
    }

    async fn supervise<F>(&self, handle: TaskHandle, on_feedback: &mut F) -> Result<TaskResult>
    where
        F: FnMut(&Feedback),
    {
        let started = Instant::now();
        let mut last_feedback = None;

        loop {
            if self.executor.is_task_complete(handle).await? {
                break;
            }
            if let Some(feedback) = self.executor.get_feedback(handle).await? {
                debug!(%handle, message = %feedback.message, "task feedback");
                on_feedback(&feedback);
                last_feedback = Some(feedback);
            }
            if let Some(deadline) = self.config.deadline {
                if started.elapsed() >= deadline {
                    return Err(DispatchError::DeadlineExceeded);
                }
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }

        let status = self.executor.task_status(handle).await?;
        let outcome = match status {
            TaskStatus::Succeeded => TaskOutcome::Succeeded,
            TaskStatus::Failed => TaskOutcome::Failed,
            TaskStatus::Cancelled => TaskOutcome::Cancelled,
            TaskStatus::Pending | TaskStatus::Running => {
                warn!(%handle, ?status, "executor reported completion with a non-terminal status");
                return Err(DispatchError::Executor(ExecutorError::Backend(
                    "completed task has non-terminal status".into(),
                )));
            }
        };

        Ok(TaskResult {
            outcome,
            last_feedback,
        })
    }
}
