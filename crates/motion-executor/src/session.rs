//! Executor session lifecycle.
//!
//! One session wraps one executor backend for the life of the process and
//! owns the connection state machine:
//! `Uninitialized -> Initializing -> Active <-> Running`. There is no path
//! back to `Uninitialized`; teardown is external and terminal.

use crate::{ExecutorError, MotionExecutor, Pose, Result, TaskHandle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initializing,
    Active,
    Running,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long `activate` waits for the executor to report readiness
    /// before giving up with `ExecutorUnavailable`.
    pub ready_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ready_timeout: Duration::from_secs(30),
        }
    }
}

/// Owned handle to one motion executor connection.
pub struct ExecutorSession {
    executor: Arc<dyn MotionExecutor>,
    config: SessionConfig,
    state: SessionState,
    initial_pose_set: bool,
}

impl ExecutorSession {
    pub fn new(executor: Arc<dyn MotionExecutor>, config: SessionConfig) -> Self {
        Self {
            executor,
            config,
            state: SessionState::Uninitialized,
            initial_pose_set: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn executor(&self) -> Arc<dyn MotionExecutor> {
        Arc::clone(&self.executor)
    }

    /// Bring the executor to `Active`. Sets the initial pose (origin with
    /// the given heading) once per session, then waits for readiness within
    /// the configured timeout. A no-op when already active or running.
    pub async fn activate(&mut self, heading: f64) -> Result<()> {
        match self.state {
            SessionState::Active | SessionState::Running => return Ok(()),
            SessionState::Initializing => {
                return Err(ExecutorError::InvalidTransition(
                    "activation already in progress",
                ))
            }
            SessionState::Uninitialized => {}
        }

        self.state = SessionState::Initializing;
        if !self.initial_pose_set {
            let start = Pose::origin_with_heading(heading);
            self.executor.set_initial_pose(&start).await?;
            self.initial_pose_set = true;
            debug!(heading, "initial pose declared at origin");
        }

        match self
            .executor
            .wait_until_active(self.config.ready_timeout)
            .await
        {
            Ok(()) => {
                self.state = SessionState::Active;
                info!("motion executor active");
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Uninitialized;
                Err(e)
            }
        }
    }

    /// Submit a goal pose. Requires `Active`; moves the session to
    /// `Running` on acceptance.
    pub async fn submit(&mut self, pose: &Pose) -> Result<TaskHandle> {
        match self.state {
            SessionState::Active => {}
            SessionState::Running => {
                return Err(ExecutorError::InvalidTransition(
                    "a task is already running",
                ))
            }
            _ => {
                return Err(ExecutorError::InvalidTransition(
                    "session is not active",
                ))
            }
        }
        let handle = self.executor.go_to_pose(pose).await?;
        self.state = SessionState::Running;
        debug!(%handle, "goal submitted");
        Ok(handle)
    }

    /// Record task completion, returning the session to `Active` so the
    /// next command can be accepted.
    pub fn task_finished(&mut self) {
        if self.state == SessionState::Running {
            self.state = SessionState::Active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockExecutor, MockScript};
    use crate::NavigationGoal;

    fn session(exec: MockExecutor) -> ExecutorSession {
        ExecutorSession::new(Arc::new(exec), SessionConfig::default())
    }

    #[tokio::test]
    async fn activation_sets_initial_pose_once() -> anyhow::Result<()> {
        let exec = Arc::new(MockExecutor::new(MockScript::succeeding(1)));
        let mut session =
            ExecutorSession::new(Arc::clone(&exec) as Arc<dyn MotionExecutor>, SessionConfig::default());

        assert_eq!(session.state(), SessionState::Uninitialized);
        session.activate(1.0).await?;
        assert_eq!(session.state(), SessionState::Active);
        let first = exec.initial_pose();
        assert!(first.is_some());

        // Re-activation is a no-op and must not move the initial pose.
        session.activate(2.5).await?;
        assert_eq!(exec.initial_pose(), first);
        Ok(())
    }

    #[tokio::test]
    async fn unavailable_executor_fails_activation() {
        let mut session = session(MockExecutor::never_ready(MockScript::succeeding(1)));
        let err = session.activate(0.0).await;
        assert!(matches!(err, Err(ExecutorError::ExecutorUnavailable(_))));
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[tokio::test]
    async fn submit_requires_active_session() -> anyhow::Result<()> {
        let mut session = session(MockExecutor::new(MockScript::succeeding(1)));
        let goal = NavigationGoal::new(1.0, 1.0, 0.0)?;
        let pose = Pose::from_goal(&goal);

        assert!(session.submit(&pose).await.is_err());

        session.activate(goal.heading).await?;
        let handle = session.submit(&pose).await?;
        assert_eq!(session.state(), SessionState::Running);

        // Second submission while running is a transition error.
        assert!(session.submit(&pose).await.is_err());

        session.task_finished();
        assert_eq!(session.state(), SessionState::Active);
        let _ = handle;
        Ok(())
    }
}
