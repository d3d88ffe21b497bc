//! nav-dispatch: goal dispatch and task supervision
//!
//! Owns the command side of the dispatch loop: the [`GoalDispatcher`]
//! submits one goal at a time to a [`motion_executor::MotionExecutor`] and
//! the [`TaskMonitor`] polls the task to a terminal [`TaskResult`],
//! surfacing feedback along the way.

mod error;
pub use error::{DispatchError, Result};

mod dispatcher;
pub use dispatcher::{GoalDispatcher, SharedSession};

mod monitor;
pub use monitor::{MonitorConfig, TaskMonitor, TaskOutcome, TaskResult};

use motion_executor::{ExecutorSession, MotionExecutor, SessionConfig};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Wire a dispatcher and monitor around one executor backend. They share
/// the session and the single in-flight task slot.
pub fn new_pipeline(
    executor: Arc<dyn MotionExecutor>,
    session_config: SessionConfig,
    monitor_config: MonitorConfig,
) -> (GoalDispatcher, TaskMonitor) {
    let session: SharedSession = Arc::new(Mutex::new(ExecutorSession::new(
        Arc::clone(&executor),
        session_config,
    )));
    let in_flight = Arc::new(Mutex::new(None));

    let dispatcher = GoalDispatcher::new(Arc::clone(&session), Arc::clone(&in_flight));
    let monitor = TaskMonitor::new(session, in_flight, executor, monitor_config);
    (dispatcher, monitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_executor::mock::{MockExecutor, MockScript};
    use motion_executor::{ExecutorError, NavigationGoal};
    use std::time::Duration;

    fn fast_monitor() -> MonitorConfig {
        MonitorConfig {
            poll_interval: Duration::from_millis(1),
            deadline: None,
        }
    }

    fn pipeline(script: MockScript) -> (Arc<MockExecutor>, GoalDispatcher, TaskMonitor) {
        let exec = Arc::new(MockExecutor::new(script));
        let (dispatcher, monitor) = new_pipeline(
            Arc::clone(&exec) as Arc<dyn MotionExecutor>,
            SessionConfig::default(),
            fast_monitor(),
        );
        (exec, dispatcher, monitor)
    }

    #[tokio::test]
    async fn goal_runs_to_success() -> anyhow::Result<()> {
        let (exec, dispatcher, monitor) = pipeline(MockScript::succeeding(3));
        let goal = NavigationGoal::new(2.0, -1.5, 1.57)?;

        let handle = dispatcher.dispatch(&goal).await?;
        let mut seen = Vec::new();
        let result = monitor
            .await_completion(handle, |fb| seen.push(fb.message.clone()))
            .await?;

        assert_eq!(result.outcome, TaskOutcome::Succeeded);
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], "en route, checkpoint 0");
        assert_eq!(
            result.last_feedback.map(|f| f.message),
            Some("en route, checkpoint 2".to_string())
        );

        // Submitted pose carries the goal through unchanged.
        let poses = exec.submitted_poses();
        assert_eq!(poses.len(), 1);
        assert!((poses[0].position.x - 2.0).abs() < 1e-12);
        assert!((poses[0].position.y + 1.5).abs() < 1e-12);
        assert!((poses[0].yaw() - 1.57).abs() < 1e-9);
        Ok(())
    }

    #[tokio::test]
    async fn dispatch_while_running_is_rejected_without_disturbing_the_task() -> anyhow::Result<()> {
        let (exec, dispatcher, _monitor) = pipeline(MockScript::succeeding(10));
        let goal = NavigationGoal::new(1.0, 1.0, 0.0)?;

        let handle = dispatcher.dispatch(&goal).await?;
        let polls_before = exec.poll_count(handle);

        let second = dispatcher.dispatch(&goal).await;
        assert!(matches!(second, Err(DispatchError::TaskAlreadyInProgress)));

        assert_eq!(exec.poll_count(handle), polls_before);
        assert_eq!(exec.submitted_poses().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn failed_task_frees_the_executor_for_the_next_command() -> anyhow::Result<()> {
        let (_exec, dispatcher, monitor) = pipeline(MockScript::failing(2));
        let goal = NavigationGoal::new(0.5, 0.5, 0.0)?;

        let handle = dispatcher.dispatch(&goal).await?;
        let result = monitor.await_completion(handle, |_| {}).await?;
        assert_eq!(result.outcome, TaskOutcome::Failed);

        // Slot and session are released; a fresh dispatch is accepted.
        let handle2 = dispatcher.dispatch(&goal).await?;
        let result2 = monitor.await_completion(handle2, |_| {}).await?;
        assert_eq!(result2.outcome, TaskOutcome::Failed);
        Ok(())
    }

    #[tokio::test]
    async fn terminal_outcome_is_idempotent() -> anyhow::Result<()> {
        let (exec, dispatcher, monitor) = pipeline(MockScript::cancelled(1));
        let goal = NavigationGoal::new(0.0, 0.0, 0.0)?;

        let handle = dispatcher.dispatch(&goal).await?;
        let result = monitor.await_completion(handle, |_| {}).await?;
        assert_eq!(result.outcome, TaskOutcome::Cancelled);

        // Re-querying the resolved handle must report the same outcome.
        assert_eq!(
            exec.task_status(handle).await?,
            motion_executor::TaskStatus::Cancelled
        );
        Ok(())
    }

    #[tokio::test]
    async fn supervision_deadline_bounds_an_unresponsive_task() -> anyhow::Result<()> {
        let never_done = MockScript {
            feedback: Vec::new(),
            polls_until_complete: usize::MAX,
            outcome: motion_executor::TaskStatus::Succeeded,
        };
        let exec = Arc::new(MockExecutor::new(never_done));
        let (dispatcher, monitor) = new_pipeline(
            Arc::clone(&exec) as Arc<dyn MotionExecutor>,
            SessionConfig::default(),
            MonitorConfig {
                poll_interval: Duration::from_millis(1),
                deadline: Some(Duration::from_millis(20)),
            },
        );

        let goal = NavigationGoal::new(1.0, 0.0, 0.0)?;
        let handle = dispatcher.dispatch(&goal).await?;
        let err = monitor.await_completion(handle, |_| {}).await;
        assert!(matches!(err, Err(DispatchError::DeadlineExceeded)));
        Ok(())
    }

    #[tokio::test]
    async fn deadline_exit_releases_the_pipeline_for_the_next_command() -> anyhow::Result<()> {
        let never_done = MockScript {
            feedback: Vec::new(),
            polls_until_complete: usize::MAX,
            outcome: motion_executor::TaskStatus::Succeeded,
        };
        let exec = Arc::new(MockExecutor::new(never_done));
        let (dispatcher, monitor) = new_pipeline(
            Arc::clone(&exec) as Arc<dyn MotionExecutor>,
            SessionConfig::default(),
            MonitorConfig {
                poll_interval: Duration::from_millis(1),
                deadline: Some(Duration::from_millis(20)),
            },
        );

        let goal = NavigationGoal::new(1.0, 0.0, 0.0)?;
        let handle = dispatcher.dispatch(&goal).await?;
        let err = monitor.await_completion(handle, |_| {}).await;
        assert!(matches!(err, Err(DispatchError::DeadlineExceeded)));

        // The abandoned task must not wedge the loop: the slot is free and
        // the session is active again, so a fresh goal is accepted.
        let handle2 = dispatcher.dispatch(&goal).await?;
        assert_ne!(handle, handle2);
        assert_eq!(exec.submitted_poses().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn unavailable_executor_surfaces_at_dispatch() -> anyhow::Result<()> {
        let exec = Arc::new(MockExecutor::never_ready(MockScript::succeeding(1)));
        let (dispatcher, _monitor) = new_pipeline(
            exec as Arc<dyn MotionExecutor>,
            SessionConfig {
                ready_timeout: Duration::from_millis(10),
            },
            fast_monitor(),
        );

        let goal = NavigationGoal::new(1.0, 0.0, 0.0)?;
        let err = dispatcher.dispatch(&goal).await;
        assert!(matches!(
            err,
            Err(DispatchError::Executor(ExecutorError::ExecutorUnavailable(_)))
        ));
        Ok(())
    }
}
