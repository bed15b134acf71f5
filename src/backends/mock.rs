use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{LlmBackend, LlmError};

#[derive(Debug, Clone)]
enum MockReply {
    Echo,
    Fixed(String),
    Fail(LlmError),
}

/// Offline backend for the CLI's `mock` backend and for tests.
pub struct MockBackend {
    reply: MockReply,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            reply: MockReply::Echo,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Fixed(response.into()),
            ..Self::new()
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            reply: MockReply::Fail(error),
            ..Self::new()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmBackend for MockBackend {
    async fn send_message(&self, message: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            MockReply::Echo => Ok(format!(
                "Mock summary of {} characters of conversation.",
                message.chars().count()
            )),
            MockReply::Fixed(response) => Ok(response.clone()),
            MockReply::Fail(error) => Err(error.clone().into()),
        }
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_response_counts_calls() {
        let backend = MockBackend::with_response("summary");

        assert_eq!(backend.send_message("a").await.unwrap(), "summary");
        assert_eq!(backend.send_message("b").await.unwrap(), "summary");
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_backend_carries_llm_error() {
        let backend = MockBackend::failing(LlmError::NetworkError {
            message: "connection refused".to_string(),
        });

        let error = backend.send_message("a").await.unwrap_err();
        let llm_error = error.downcast_ref::<LlmError>().unwrap();
        assert!(matches!(llm_error, LlmError::NetworkError { .. }));
    }
}
