use crate::{Reply, Result};
use async_trait::async_trait;

/// One round trip to the language-understanding service: operator text in,
/// structured intent or conversational content out.
#[async_trait]
pub trait LanguageBackend: Send + Sync {
    async fn interpret(&self, text: &str) -> Result<Reply>;
}
