//! language-service: contract for the language-understanding service
//!
//! Declares the `navigate_robot` function schema, the [`Reply`] the service
//! produces (a function-call intent or free text), and backends behind the
//! [`LanguageBackend`] trait: an OpenAI-compatible HTTP client (feature
//! `openai`) and a rule-based offline mock (feature `mock`, default).

mod error;
pub use error::{LanguageError, Result};

mod types;
pub use types::{
    navigate_function_schema, FunctionCall, LanguageConfig, Reply, NAVIGATE_FUNCTION,
};

mod traits;
pub use traits::LanguageBackend;

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "openai")]
pub mod openai;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Mock,
    OpenAi,
}

/// Build a language backend for the given kind.
pub fn create_backend(
    kind: BackendKind,
    config: LanguageConfig,
) -> Result<std::sync::Arc<dyn LanguageBackend>> {
    match kind {
        #[cfg(feature = "mock")]
        BackendKind::Mock => {
            let _ = config;
            Ok(std::sync::Arc::new(mock::MockBackend::new()))
        }
        #[cfg(feature = "openai")]
        BackendKind::OpenAi => Ok(std::sync::Arc::new(openai::OpenAiBackend::new(config)?)),
        #[allow(unreachable_patterns)]
        other => Err(LanguageError::UnsupportedBackend(format!("{other:?}"))),
    }
}
