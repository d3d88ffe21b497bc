use thiserror::Error;

pub type Result<T, E = LanguageError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("no API key configured for the language service")]
    MissingApiKey,
    #[error("language service request failed: {0}")]
    Http(String),
    #[error("malformed reply from language service: {0}")]
    MalformedReply(&'static str),
    #[error("unsupported backend: {0}")]
    UnsupportedBackend(String),
}
