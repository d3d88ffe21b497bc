use motion_executor::ExecutorError;
use thiserror::Error;

pub type Result<T, E = DispatchError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("a navigation task is already in progress")]
    TaskAlreadyInProgress,
    #[error("deadline exceeded while supervising the navigation task")]
    DeadlineExceeded,
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}
