use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::backends::{LlmBackend, LlmError, retry_with_backoff};
use crate::console::console;
use crate::context_management::CompactionConfig;
use crate::conversations::{Turn, render_transcript};

pub const DEFAULT_SUMMARY_DOMAIN: &str = "shipping and logistics analytics";

/// Reduces a prefix of turns to a short synopsis. Never fails: implementations
/// return a usable string even when their backing service does not answer.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, turns: &[Turn]) -> String;
}

/// Synopsis used whenever the summarization service cannot produce one.
pub fn fallback_summary(turn_count: usize, domain: &str) -> String {
    format!(
        "Previous conversation covered {} exchanges about {}.",
        turn_count, domain
    )
}

/// Summarizer backed by an LLM.
#[derive(Clone)]
pub struct MessageSummarizer {
    backend: Arc<dyn LlmBackend>,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    domain: String,
}

impl MessageSummarizer {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self::from_config(backend, &CompactionConfig::default())
    }

    pub fn from_config(backend: Arc<dyn LlmBackend>, config: &CompactionConfig) -> Self {
        Self {
            backend,
            timeout: Duration::from_secs(config.summary_timeout_secs),
            max_retries: config.summary_max_retries,
            retry_delay: Duration::from_secs(1),
            domain: config.summary_domain.clone(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    fn build_summary_request(&self, turns: &[Turn]) -> String {
        format!(
            "Summarize the following conversation between a user and a {} assistant \
             in 3-5 sentences. Preserve:\n\
             - Questions the user asked\n\
             - Concrete findings and numbers that were mentioned\n\
             - Reports, charts, or other artifacts that were created\n\
             - Any explicit corrections or preferences the user stated\n\n\
             Omit routine acknowledgments. Provide only the summary, no preamble.\n\n\
             Conversation:\n\n{}",
            self.domain,
            render_transcript(turns)
        )
    }

    async fn request_once(&self, prompt: &str) -> Result<String, LlmError> {
        let reply = tokio::time::timeout(self.timeout, self.backend.send_message(prompt))
            .await
            .map_err(|_| LlmError::Timeout {
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| {
                e.downcast::<LlmError>().unwrap_or_else(|e| LlmError::Other {
                    message: e.to_string(),
                })
            })?;

        let summary = reply.trim();
        if summary.is_empty() {
            return Err(LlmError::InvalidResponse {
                message: "empty summary".to_string(),
            });
        }
        Ok(summary.to_string())
    }
}

#[async_trait]
impl Summarizer for MessageSummarizer {
    async fn summarize(&self, turns: &[Turn]) -> String {
        if turns.is_empty() {
            return fallback_summary(0, &self.domain);
        }

        let prompt = self.build_summary_request(turns);
        console().debug(&format!(
            "Summary request for {} turns ({} chars) via {}",
            turns.len(),
            prompt.len(),
            self.backend.backend_name()
        ));

        let prompt = prompt.as_str();
        let outcome = retry_with_backoff(
            || self.request_once(prompt),
            self.max_retries,
            self.retry_delay,
            "Conversation summary",
        )
        .await;

        match outcome.result {
            Ok(summary) => summary,
            Err(e) => {
                console().warning(&format!(
                    "Conversation summary unavailable ({}), using fallback",
                    e.user_message()
                ));
                fallback_summary(turns.len(), &self.domain)
            }
        }
    }
}
