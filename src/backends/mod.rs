use anyhow::Result;
use async_trait::async_trait;

/// Text-generation service used for conversation summaries.
///
/// Implementations report failures as `anyhow::Error` wrapping an [`LlmError`]
/// so callers can downcast to decide whether a retry makes sense.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn send_message(&self, message: &str) -> Result<String>;

    fn backend_name(&self) -> &str;
}

pub mod backend_factory;
pub mod llm_error;
pub mod mock;
#[cfg(feature = "openai-compatible")]
pub mod openai_compatible;
pub mod retry;

pub use backend_factory::{BackendFactory, create_backend};
pub use llm_error::LlmError;
pub use mock::MockBackend;
#[cfg(feature = "openai-compatible")]
pub use openai_compatible::{OpenAICompatibleBackend, OpenAICompatibleConfig};
pub use retry::{RetryResult, retry_with_backoff};
