use std::time::Duration;
use thiserror::Error;

pub type Result<T, E = ExecutorError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("invalid goal: {0}")]
    InvalidGoal(&'static str),
    #[error("motion executor did not become active within {0:?}")]
    ExecutorUnavailable(Duration),
    #[error("invalid session transition: {0}")]
    InvalidTransition(&'static str),
    #[error("unknown task handle")]
    UnknownTask,
    #[error("executor backend error: {0}")]
    Backend(String),
}
