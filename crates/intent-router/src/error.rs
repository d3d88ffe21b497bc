use nav_dispatch::DispatchError;
use thiserror::Error;

pub type Result<T, E = RouterError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("unrecognized command from language service: {0}")]
    UnrecognizedIntent(String),
    #[error("invalid navigation arguments: {0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
