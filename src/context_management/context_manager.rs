use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::backends::LlmBackend;
use crate::context_management::{
    CompactionResult, ConversationAccountant, ConversationCompactor, DEFAULT_CHARS_PER_TOKEN,
    DEFAULT_SUMMARY_DOMAIN, MessageSummarizer, Summarizer,
};
use crate::conversations::Conversation;
use crate::tool_status::{ToolExecutionRecord, ToolStatusLine, ToolStatusRegistry};

/// Compaction policy. The defaults decide when users start seeing summaries,
/// so they only change with a release note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactionConfig {
    /// Compact once a conversation has more turns than this.
    pub max_turns: usize,
    /// Compact once the estimated cost exceeds this many tokens.
    pub max_cost: usize,
    /// Turns kept verbatim at the end of a compacted conversation.
    pub keep_recent: usize,
    pub chars_per_token: usize,
    pub warning_threshold: f32,
    pub summary_timeout_secs: u64,
    pub summary_max_retries: u32,
    pub summary_domain: String,
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            max_turns: 8,
            max_cost: 4_000,
            keep_recent: 4,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            warning_threshold: 0.70,
            summary_timeout_secs: 30,
            summary_max_retries: 0,
            summary_domain: DEFAULT_SUMMARY_DOMAIN.to_string(),
        }
    }
}

impl CompactionConfig {
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_max_cost(mut self, max_cost: usize) -> Self {
        self.max_cost = max_cost;
        self
    }

    pub fn with_keep_recent(mut self, keep_recent: usize) -> Self {
        self.keep_recent = keep_recent;
        self
    }

    pub fn with_chars_per_token(mut self, chars_per_token: usize) -> Self {
        self.chars_per_token = chars_per_token;
        self
    }

    pub fn with_warning_threshold(mut self, threshold: f32) -> Self {
        self.warning_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

/// Entry point for the host application: compaction decisions, compaction,
/// and tool status formatting.
pub struct ContextManager {
    pub config: CompactionConfig,
    compactor: ConversationCompactor,
    tool_statuses: ToolStatusRegistry,
}

impl ContextManager {
    pub fn new(config: CompactionConfig, summarizer: Arc<dyn Summarizer>) -> Self {
        let compactor = ConversationCompactor::new(&config, summarizer);
        Self {
            config,
            compactor,
            tool_statuses: ToolStatusRegistry::default(),
        }
    }

    pub fn with_default_config(summarizer: Arc<dyn Summarizer>) -> Self {
        Self::new(CompactionConfig::default(), summarizer)
    }

    /// Wire an LLM backend through a [`MessageSummarizer`] built from `config`.
    pub fn from_backend(config: CompactionConfig, backend: Arc<dyn LlmBackend>) -> Self {
        let summarizer = Arc::new(MessageSummarizer::from_config(backend, &config));
        Self::new(config, summarizer)
    }

    pub fn with_tool_registry(mut self, registry: ToolStatusRegistry) -> Self {
        self.tool_statuses = registry;
        self
    }

    pub fn accountant(&self) -> &ConversationAccountant {
        self.compactor.accountant()
    }

    pub fn needs_compaction(&self, conversation: &Conversation) -> bool {
        self.accountant().needs_compaction(conversation.turns())
    }

    pub async fn compact(&self, conversation: &Conversation) -> CompactionResult {
        self.compactor.compact(conversation).await
    }

    pub fn format_tool_execution(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        self.tool_statuses.format(record)
    }

    pub fn total_cost(&self, conversation: &Conversation) -> usize {
        self.accountant().total_cost(conversation.turns())
    }

    pub fn token_pressure(&self, conversation: &Conversation) -> f32 {
        self.accountant().token_pressure(conversation.turns())
    }

    pub fn should_warn_about_pressure(&self, conversation: &Conversation) -> bool {
        self.accountant()
            .should_warn_about_pressure(conversation.turns())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{LlmError, MockBackend};
    use crate::context_management::fallback_summary;
    use serde_json::json;

    #[test]
    fn test_compaction_config_defaults() {
        let config = CompactionConfig::default();

        assert_eq!(config.max_turns, 8);
        assert_eq!(config.max_cost, 4_000);
        assert_eq!(config.keep_recent, 4);
        assert_eq!(config.chars_per_token, 4);
        assert_eq!(config.summary_max_retries, 0);
    }

    #[test]
    fn test_compaction_config_builders() {
        let config = CompactionConfig::default()
            .with_max_turns(20)
            .with_max_cost(16_000)
            .with_keep_recent(6)
            .with_chars_per_token(3)
            .with_warning_threshold(1.5);

        assert_eq!(config.max_turns, 20);
        assert_eq!(config.max_cost, 16_000);
        assert_eq!(config.keep_recent, 6);
        assert_eq!(config.chars_per_token, 3);
        assert_eq!(config.warning_threshold, 1.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CompactionConfig = toml::from_str("max_turns = 12").unwrap();

        assert_eq!(config.max_turns, 12);
        assert_eq!(config.max_cost, 4_000);
        assert_eq!(config.summary_domain, DEFAULT_SUMMARY_DOMAIN);
    }

    #[tokio::test]
    async fn test_host_entry_points() {
        let backend = Arc::new(MockBackend::failing(LlmError::NetworkError {
            message: "offline".to_string(),
        }));
        let manager = ContextManager::from_backend(CompactionConfig::default(), backend);

        let mut conversation = Conversation::new();
        for i in 0..5 {
            conversation.add_user_message(format!("question {}", i));
            conversation.add_assistant_message(format!("answer {}", i));
        }
        assert!(manager.needs_compaction(&conversation));

        let result = manager.compact(&conversation).await;
        assert!(result.was_compacted);
        assert_eq!(
            result.summary_text,
            Some(fallback_summary(6, DEFAULT_SUMMARY_DOMAIN))
        );
        assert!(!manager.needs_compaction(&result.conversation));

        let record = ToolExecutionRecord::new("list_tables", json!({}), json!({"tables": ["shipments"]}));
        let line = manager.format_tool_execution(&record);
        assert!(!line.is_failure());
    }

    #[test]
    fn test_pressure_reporting() {
        let manager = ContextManager::with_default_config(Arc::new(MessageSummarizer::new(
            Arc::new(MockBackend::new()),
        )));

        let conversation = Conversation::from_turns(vec![
            crate::conversations::Turn::user("x".repeat(12_000)),
        ]);
        assert_eq!(manager.total_cost(&conversation), 3_000);
        assert!(manager.token_pressure(&conversation) > 0.74);
        assert!(manager.should_warn_about_pressure(&conversation));
    }
}
