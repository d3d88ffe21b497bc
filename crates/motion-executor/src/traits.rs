use crate::{Feedback, Pose, Result, TaskHandle, TaskStatus};
use async_trait::async_trait;
use std::time::Duration;

/// Contract exposed by an external navigation stack. The dispatch loop
/// depends only on this interface, never on a concrete stack.
#[async_trait]
pub trait MotionExecutor: Send + Sync {
    /// Declare the robot's believed start pose.
    async fn set_initial_pose(&self, pose: &Pose) -> Result<()>;

    /// Block until the stack is ready to accept goals, or the timeout
    /// elapses.
    async fn wait_until_active(&self, timeout: Duration) -> Result<()>;

    /// Submit a goal pose as a new navigation task.
    async fn go_to_pose(&self, pose: &Pose) -> Result<TaskHandle>;

    /// Whether the task has reached a terminal state.
    async fn is_task_complete(&self, handle: TaskHandle) -> Result<bool>;

    /// Current status of the task. Once terminal, repeated queries must
    /// report the same outcome.
    async fn task_status(&self, handle: TaskHandle) -> Result<TaskStatus>;

    /// Latest progress record for the task, if the stack produced one since
    /// the previous query.
    async fn get_feedback(&self, handle: TaskHandle) -> Result<Option<Feedback>>;
}
