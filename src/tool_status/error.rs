use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolStatusError {
    #[error("Formatter for tool '{tool}' already registered")]
    DuplicateFormatter { tool: String },
}
