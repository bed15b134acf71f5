pub mod backends;
pub mod cli;
pub mod config;
pub mod console;
pub mod context_management;
pub mod conversations;
pub mod tool_status;

pub use backends::{LlmBackend, LlmError, MockBackend, create_backend};
#[cfg(feature = "openai-compatible")]
pub use backends::{OpenAICompatibleBackend, OpenAICompatibleConfig};
pub use config::{AppConfig, BackendConfig, ConfigError};
pub use console::{Console, VerbosityLevel, console, init_console};
pub use context_management::{
    CompactionConfig, CompactionResult, ContextManager, ConversationAccountant,
    ConversationCompactor, MessageSummarizer, Summarizer, TokenEstimator,
};
pub use conversations::{Conversation, Role, Turn};
pub use tool_status::{
    StatusIcon, ToolExecutionRecord, ToolStatusFormatter, ToolStatusLine, ToolStatusRegistry,
};
