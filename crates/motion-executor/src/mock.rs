//! Scriptable in-process executor for tests and offline runs.

use crate::{
    ExecutorError, Feedback, MotionExecutor, Pose, Result, TaskHandle, TaskStatus,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// What the mock does with each submitted task.
#[derive(Debug, Clone)]
pub struct MockScript {
    /// Feedback records handed out one per poll, in order.
    pub feedback: Vec<Feedback>,
    /// Polls of `is_task_complete` before the task turns terminal.
    pub polls_until_complete: usize,
    /// Terminal status reported once complete.
    pub outcome: TaskStatus,
}

impl MockScript {
    pub fn succeeding(polls: usize) -> Self {
        Self {
            feedback: (0..polls)
                .map(|i| Feedback {
                    message: format!("en route, checkpoint {i}"),
                    distance_remaining: Some((polls - i) as f64 * 0.5),
                    ts: None,
                })
                .collect(),
            polls_until_complete: polls,
            outcome: TaskStatus::Succeeded,
        }
    }

    pub fn failing(polls: usize) -> Self {
        Self {
            outcome: TaskStatus::Failed,
            ..Self::succeeding(polls)
        }
    }

    pub fn cancelled(polls: usize) -> Self {
        Self {
            outcome: TaskStatus::Cancelled,
            ..Self::succeeding(polls)
        }
    }
}

struct TaskState {
    polls: usize,
    status: TaskStatus,
}

struct Inner {
    initial_pose: Option<Pose>,
    tasks: HashMap<TaskHandle, TaskState>,
    submitted: Vec<Pose>,
}

/// In-process [`MotionExecutor`]. Every submitted task follows the
/// configured script; readiness is immediate unless `never_ready` is set.
pub struct MockExecutor {
    script: MockScript,
    ready: bool,
    inner: Mutex<Inner>,
}

impl MockExecutor {
    pub fn new(script: MockScript) -> Self {
        Self {
            script,
            ready: true,
            inner: Mutex::new(Inner {
                initial_pose: None,
                tasks: HashMap::new(),
                submitted: Vec::new(),
            }),
        }
    }

    /// An executor whose `wait_until_active` never succeeds.
    pub fn never_ready(script: MockScript) -> Self {
        Self {
            ready: false,
            ..Self::new(script)
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| ExecutorError::Backend("mock state poisoned".into()))
    }

    /// Initial pose recorded by `set_initial_pose`, if any.
    pub fn initial_pose(&self) -> Option<Pose> {
        self.lock().ok().and_then(|g| g.initial_pose)
    }

    /// Every goal pose submitted so far, oldest first.
    pub fn submitted_poses(&self) -> Vec<Pose> {
        self.lock().map(|g| g.submitted.clone()).unwrap_or_default()
    }

    /// How many completion polls a task has received.
    pub fn poll_count(&self, handle: TaskHandle) -> usize {
        self.lock()
            .ok()
            .and_then(|g| g.tasks.get(&handle).map(|t| t.polls))
            .unwrap_or(0)
    }
}

#[async_trait]
impl MotionExecutor for MockExecutor {
    async fn set_initial_pose(&self, pose: &Pose) -> Result<()> {
        self.lock()?.initial_pose = Some(*pose);
        Ok(())
    }

    async fn wait_until_active(&self, timeout: Duration) -> Result<()> {
        if self.ready {
            Ok(())
        } else {
            Err(ExecutorError::ExecutorUnavailable(timeout))
        }
    }

    async fn go_to_pose(&self, pose: &Pose) -> Result<TaskHandle> {
        let handle = TaskHandle::new();
        let mut inner = self.lock()?;
        inner.submitted.push(*pose);
        inner.tasks.insert(
            handle,
            TaskState {
                polls: 0,
                status: TaskStatus::Running,
            },
        );
        Ok(handle)
    }

    async fn is_task_complete(&self, handle: TaskHandle) -> Result<bool> {
        let mut inner = self.lock()?;
        let script = self.script.clone();
        let task = inner.tasks.get_mut(&handle).ok_or(ExecutorError::UnknownTask)?;
        if task.status.is_terminal() {
            return Ok(true);
        }
        if task.polls >= script.polls_until_complete {
            task.status = script.outcome;
            return Ok(true);
        }
        task.polls += 1;
        Ok(false)
    }

    async fn task_status(&self, handle: TaskHandle) -> Result<TaskStatus> {
        let inner = self.lock()?;
        let task = inner.tasks.get(&handle).ok_or(ExecutorError::UnknownTask)?;
        Ok(task.status)
    }

    async fn get_feedback(&self, handle: TaskHandle) -> Result<Option<Feedback>> {
        let inner = self.lock()?;
        let task = inner.tasks.get(&handle).ok_or(ExecutorError::UnknownTask)?;
        if task.status.is_terminal() || task.polls == 0 {
            return Ok(None);
        }
        // polls was already advanced for this round by is_task_complete
        Ok(self.script.feedback.get(task.polls - 1).cloned())
    }
}
