use crate::{DispatchError, Result};
use motion_executor::{ExecutorSession, NavigationGoal, Pose, TaskHandle};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Shared, owned executor session. Both the dispatcher and the monitor hold
/// a handle; the mutex keeps state transitions serialized if the pipeline is
/// ever driven from more than one task.
pub type SharedSession = Arc<Mutex<ExecutorSession>>;

/// The single in-flight task slot. Exactly one navigation task may be
/// outstanding; the dispatcher fills the slot and the monitor clears it.
pub(crate) type TaskSlot = Arc<Mutex<Option<TaskHandle>>>;

/// Submits navigation goals and owns the one-task-at-a-time rule.
pub struct GoalDispatcher {
    session: SharedSession,
    in_flight: TaskSlot,
}

impl GoalDispatcher {
    pub(crate) fn new(session: SharedSession, in_flight: TaskSlot) -> Self {
        Self { session, in_flight }
    }

    /// Submit a goal to the motion executor. Activates the session on first
    /// use (bounded wait, see [`motion_executor::SessionConfig`]). Fails
    /// with [`DispatchError::TaskAlreadyInProgress`] while a task is
    /// outstanding, without touching the in-flight task.
    pub async fn dispatch(&self, goal: &NavigationGoal) -> Result<TaskHandle> {
        let mut slot = self.in_flight.lock().await;
        if slot.is_some() {
            return Err(DispatchError::TaskAlreadyInProgress);
        }

        let mut session = self.session.lock().await;
        session.activate(goal.heading).await?;
        let handle = session.submit(&Pose::from_goal(goal)).await?;
        *slot = Some(handle);
        info!(%handle, x = goal.x, y = goal.y, heading = goal.heading, "navigation goal dispatched");
        Ok(handle)
    }
}
