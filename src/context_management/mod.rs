mod compactor;
mod context_manager;
mod conversation_accountant;
mod summarizer;
mod token_estimator;

pub use compactor::{CompactionResult, ConversationCompactor};
pub use context_manager::{CompactionConfig, ContextManager};
pub use conversation_accountant::ConversationAccountant;
pub use summarizer::{DEFAULT_SUMMARY_DOMAIN, MessageSummarizer, Summarizer, fallback_summary};
pub use token_estimator::{DEFAULT_CHARS_PER_TOKEN, TokenEstimator};
